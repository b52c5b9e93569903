//! Order business logic - Placement entry point and lifecycle operations.
//!
//! `create_order` assembles the standard five-stage pipeline and runs it; the
//! remaining operations share the Order entity with the pipeline but live
//! outside it: status lookup, the forward-only status ladder, and explicit
//! cancellation.

use crate::{
    entities::{Order, OrderStatus, order},
    errors::{Error, Result},
    pipeline::{CartLockRegistry, OrderPipeline, OrderRequest, OrderResponse, PaymentGateway},
};
use sea_orm::{Set, prelude::*};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Identifier and status of an order, the answer to status queries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusView {
    /// The order being reported on
    pub order_id: i32,
    /// Its current status
    pub status: OrderStatus,
}

/// Places an order from a cart: validates preconditions, charges payment and
/// materializes the order atomically, or fails cleanly leaving no partial
/// state.
///
/// This is the single entry point of the order-placement workflow; the stage
/// sequence and transaction boundary live in
/// [`crate::pipeline::OrderPipeline`].
pub async fn create_order(
    db: &DatabaseConnection,
    locks: &Arc<CartLockRegistry>,
    gateway: Arc<dyn PaymentGateway>,
    request: OrderRequest,
) -> Result<OrderResponse> {
    OrderPipeline::standard(gateway)
        .execute(db, locks, request)
        .await
}

/// Inserts a freshly purchased order row. Called by the finalize stage inside
/// the order transaction.
pub async fn save_order<C>(
    conn: &C,
    restaurant_id: i32,
    payment_id: i32,
    total_price: f64,
) -> Result<order::Model>
where
    C: ConnectionTrait,
{
    order::ActiveModel {
        order_time: Set(chrono::Utc::now()),
        total_price: Set(total_price),
        status: Set(OrderStatus::Purchased),
        restaurant_id: Set(restaurant_id),
        payment_id: Set(payment_id),
        ..Default::default()
    }
    .insert(conn)
    .await
    .map_err(Into::into)
}

/// Retrieves an order by ID.
///
/// # Errors
/// Returns `Error::NotFound` if the order does not exist.
pub async fn get_order(db: &DatabaseConnection, order_id: i32) -> Result<order::Model> {
    Order::find_by_id(order_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "order",
            id: order_id,
        })
}

/// Reports the current status of an order.
pub async fn get_status(db: &DatabaseConnection, order_id: i32) -> Result<OrderStatusView> {
    let order = get_order(db, order_id).await?;
    Ok(OrderStatusView {
        order_id: order.id,
        status: order.status,
    })
}

/// Advances the order one rung up the status ladder.
///
/// # Errors
/// * `Error::NotFound` if the order does not exist
/// * `Error::InvalidStatusTransition` from `Delivered` or `Cancelled`
pub async fn update_status(db: &DatabaseConnection, order_id: i32) -> Result<OrderStatusView> {
    let order = get_order(db, order_id).await?;
    let next = order
        .status
        .next()
        .ok_or_else(|| Error::InvalidStatusTransition {
            from: order.status.to_string(),
        })?;

    let mut active: order::ActiveModel = order.into();
    active.status = Set(next);
    let updated = active.update(db).await?;
    info!("Order {} advanced to {}", order_id, updated.status);
    Ok(OrderStatusView {
        order_id: updated.id,
        status: updated.status,
    })
}

/// Cancels an order, if its status still permits it.
///
/// Cancellation never happens by automatic advancement and is rejected from
/// terminal states; cancel-after-delivery fails rather than silently no-ops.
///
/// # Errors
/// * `Error::NotFound` if the order does not exist
/// * `Error::InvalidStatusTransition` from `Delivered` or `Cancelled`
pub async fn cancel(db: &DatabaseConnection, order_id: i32) -> Result<OrderStatusView> {
    let order = get_order(db, order_id).await?;
    if order.status.is_terminal() {
        return Err(Error::InvalidStatusTransition {
            from: order.status.to_string(),
        });
    }

    let mut active: order::ActiveModel = order.into();
    active.status = Set(OrderStatus::Cancelled);
    let updated = active.update(db).await?;
    info!("Order {} cancelled", order_id);
    Ok(OrderStatusView {
        order_id: updated.id,
        status: updated.status,
    })
}
