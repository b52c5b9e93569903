//! Order-placement pipeline - five sequential stages under one transaction.
//!
//! The assembler links the stages into an explicit ordered list and drives
//! them inside a single transactional boundary: any stage failure rolls the
//! whole attempt back and surfaces that stage's error, so no partial state
//! ever becomes observable. Per-cart mutual exclusion is claimed before the
//! first stage and released when the attempt ends, either way.

pub mod context;
pub mod gateway;
pub mod lock;
pub mod stage;
pub mod stages;

pub use context::{OrderContext, OrderLine, OrderRequest, OrderResponse};
pub use gateway::{PaymentGateway, StaticGateway};
pub use lock::{CartLockGuard, CartLockRegistry};
pub use stage::OrderStage;
pub use stages::{
    CartLockCheck, FinalizeOrder, ItemsAvailabilityCheck, PaymentProcess, RestaurantHoursCheck,
};

use crate::errors::Result;
use sea_orm::{DatabaseConnection, TransactionTrait};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The ordered chain of stages order placement runs through.
pub struct OrderPipeline {
    stages: Vec<Box<dyn OrderStage>>,
}

impl OrderPipeline {
    /// The standard five-stage chain: cart lock check, item availability,
    /// restaurant hours, payment, finalize.
    pub fn standard(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self::with_stages(vec![
            Box::new(CartLockCheck),
            Box::new(ItemsAvailabilityCheck),
            Box::new(RestaurantHoursCheck),
            Box::new(PaymentProcess::new(gateway)),
            Box::new(FinalizeOrder),
        ])
    }

    /// Builds a pipeline from an explicit stage list. Stage order is the
    /// execution order; stages know nothing about their position.
    pub fn with_stages(stages: Vec<Box<dyn OrderStage>>) -> Self {
        Self { stages }
    }

    /// Runs the chain for one request inside one transaction.
    ///
    /// Claims the per-cart lock first, then begins the transaction and runs
    /// each stage to completion before the next. The first stage error aborts
    /// the rest of the chain, rolls back every write made so far, and is
    /// returned to the caller untouched. Only a fully successful chain
    /// commits.
    pub async fn execute(
        &self,
        db: &DatabaseConnection,
        locks: &Arc<CartLockRegistry>,
        request: OrderRequest,
    ) -> Result<OrderResponse> {
        let _guard = locks.try_acquire(request.cart_id)?;

        let txn = db.begin().await?;
        let mut ctx = OrderContext::new(request);

        for stage in &self.stages {
            debug!("Running order stage '{}'", stage.name());
            if let Err(err) = stage.run(&txn, &mut ctx).await {
                warn!("Order stage '{}' failed: {}", stage.name(), err);
                if let Err(rollback_err) = txn.rollback().await {
                    warn!("Rollback after failed stage also failed: {rollback_err}");
                }
                return Err(err);
            }
        }

        txn.commit().await?;
        info!(
            "Order pipeline committed for customer {}: order {:?}",
            ctx.response.customer_id, ctx.response.order_id
        );
        Ok(ctx.response)
    }
}
