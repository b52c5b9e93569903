//! Unified error types and result handling.
//!
//! Each stage of the order pipeline fails with its own variant so callers can
//! tell exactly which precondition or action rejected the request. Storage
//! failures surface through the `Database` variant, kept separate from the
//! domain taxonomy.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The referenced cart does not exist.
    #[error("cart {cart_id} is not available")]
    CartUnavailable {
        /// Id of the missing cart
        cart_id: i32,
    },

    /// The cart is read-only: an order is already being placed against it.
    #[error("cart {cart_id} is locked, cannot proceed with the order")]
    CartLocked {
        /// Id of the locked cart
        cart_id: i32,
    },

    /// The cart's stored line items disagree with the request.
    #[error("cart {cart_id} is in an invalid state: {message}")]
    InvalidCartState {
        /// Id of the offending cart
        cart_id: i32,
        /// What disagreed
        message: String,
    },

    /// A menu item referenced by the cart is missing or flagged unavailable.
    #[error("menu item {item_id} is currently unavailable")]
    ItemUnavailable {
        /// Id of the first unavailable item found
        item_id: i32,
    },

    /// The restaurant is unknown or outside its operating hours.
    #[error("restaurant {restaurant_id} is closed")]
    RestaurantClosed {
        /// Id of the restaurant
        restaurant_id: i32,
    },

    /// The payment gateway declined the charge.
    #[error("payment failed: {reason}")]
    PaymentFailed {
        /// Decline reason reported by the gateway
        reason: String,
    },

    /// A referenced entity does not exist.
    #[error("cannot find {entity} with id {id}")]
    NotFound {
        /// Entity kind ("cart", "restaurant", "payment", "order", ...)
        entity: &'static str,
        /// The unknown id
        id: i32,
    },

    /// The order's status does not permit the requested transition.
    #[error("order status {from} permits no further transition")]
    InvalidStatusTransition {
        /// Status the order was in when the transition was attempted
        from: String,
    },

    /// Configuration error (seed file, environment, wiring).
    #[error("configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Underlying storage failure, distinct from the domain taxonomy above.
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error (seed file reading and the like).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
