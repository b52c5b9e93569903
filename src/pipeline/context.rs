//! Order context - the request/response pair threaded through the chain.
//!
//! The request is immutable input; the response starts as an echo of the
//! request's identifying fields and accumulates results as stages complete.
//! A stage may read fields an earlier stage wrote but must not overwrite
//! fields it does not own.

use crate::entities::OrderStatus;
use sea_orm::prelude::DateTimeUtc;
use serde::{Deserialize, Serialize};

/// One requested line: a menu item and how many of it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Menu item being ordered
    pub menu_item_id: i32,
    /// Number of units
    pub quantity: i32,
}

/// Immutable input to order placement. Never rewritten by stages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Customer placing the order
    pub customer_id: i32,
    /// Restaurant the order is placed against
    pub restaurant_id: i32,
    /// Delivery slot/agent reference, owned by an external delivery service
    pub delivery_id: i32,
    /// Cart being converted into the order
    pub cart_id: i32,
    /// Requested lines; cross-checked against the cart's stored items
    pub items: Vec<OrderLine>,
    /// Where the order should go
    pub delivery_address: String,
}

/// Accumulator populated incrementally as stages complete.
///
/// Ownership of the optional fields: `total_price` and `payment_id` belong to
/// the payment stage; `order_id`, `order_time` and `order_status` to the
/// finalize stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    /// Echoed from the request
    pub customer_id: i32,
    /// Echoed from the request
    pub restaurant_id: i32,
    /// Echoed from the request
    pub delivery_id: i32,
    /// Echoed from the request
    pub items: Vec<OrderLine>,
    /// Echoed from the request
    pub delivery_address: String,
    /// Amount charged, written by the payment stage
    pub total_price: Option<f64>,
    /// Payment created for the charge, written by the payment stage
    pub payment_id: Option<i32>,
    /// Finalized order, written by the finalize stage
    pub order_id: Option<i32>,
    /// When the order was finalized, written by the finalize stage
    pub order_time: Option<DateTimeUtc>,
    /// Status the order was created in, written by the finalize stage
    pub order_status: Option<OrderStatus>,
}

impl OrderResponse {
    /// Builds the initial response echoing the request's identifying fields.
    pub fn echoing(request: &OrderRequest) -> Self {
        Self {
            customer_id: request.customer_id,
            restaurant_id: request.restaurant_id,
            delivery_id: request.delivery_id,
            items: request.items.clone(),
            delivery_address: request.delivery_address.clone(),
            total_price: None,
            payment_id: None,
            order_id: None,
            order_time: None,
            order_status: None,
        }
    }
}

/// The mutable carrier passed by reference through the chain.
#[derive(Clone, Debug, PartialEq)]
pub struct OrderContext {
    /// Immutable input
    pub request: OrderRequest,
    /// Incrementally populated output
    pub response: OrderResponse,
}

impl OrderContext {
    /// Starts a context with a fresh echo response for the request.
    pub fn new(request: OrderRequest) -> Self {
        let response = OrderResponse::echoing(&request);
        Self { request, response }
    }
}
