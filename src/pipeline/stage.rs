//! Stage abstraction - one validation or action of the order chain.
//!
//! Stages are plain values composed by an explicit ordered list in
//! [`crate::pipeline::OrderPipeline`]; no stage knows its position or its
//! successor, only the shared context contract. Inserting, removing or
//! reordering stages touches the assembler alone.

use crate::errors::Result;
use crate::pipeline::context::OrderContext;
use async_trait::async_trait;
use sea_orm::DatabaseTransaction;

/// One unit of the order-placement chain.
///
/// A stage either mutates the context and returns `Ok(())`, letting the
/// pipeline move on, or returns the stage-specific error that aborts the
/// remainder of the chain. All stages run inside the same transaction, so an
/// abort leaves no partial writes behind.
#[async_trait]
pub trait OrderStage: Send + Sync {
    /// Stable stage name used in logs.
    fn name(&self) -> &'static str;

    /// Runs the stage against the shared transaction and context.
    async fn run(&self, txn: &DatabaseTransaction, ctx: &mut OrderContext) -> Result<()>;
}
