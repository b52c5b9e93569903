//! Order entity - A finalized purchase and its status state machine.
//!
//! The status ladder only moves forward, one rung per update, and `Cancelled`
//! is reachable from any non-terminal rung through an explicit cancel. Both
//! `Delivered` and `Cancelled` are terminal.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum OrderStatus {
    /// Payment taken, order materialized
    #[sea_orm(string_value = "PURCHASED")]
    Purchased,
    /// The kitchen is working on it
    #[sea_orm(string_value = "PREPARING")]
    Preparing,
    /// Handed to the courier
    #[sea_orm(string_value = "OUT_FOR_DELIVERY")]
    OutForDelivery,
    /// Terminal: the customer has the food
    #[sea_orm(string_value = "DELIVERED")]
    Delivered,
    /// Terminal: explicitly cancelled before delivery
    #[sea_orm(string_value = "CANCELLED")]
    Cancelled,
}

impl OrderStatus {
    /// The next rung of the ladder, or `None` from a terminal state.
    ///
    /// `Cancelled` is never returned here; it is only reachable through an
    /// explicit cancel.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Purchased => Some(Self::Preparing),
            Self::Preparing => Some(Self::OutForDelivery),
            Self::OutForDelivery => Some(Self::Delivered),
            Self::Delivered | Self::Cancelled => None,
        }
    }

    /// Whether no further transition is permitted from this state.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// The stored string form of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Purchased => "PURCHASED",
            Self::Preparing => "PREPARING",
            Self::OutForDelivery => "OUT_FOR_DELIVERY",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    /// Unique identifier for the order
    #[sea_orm(primary_key)]
    pub id: i32,
    /// When the order was finalized
    pub order_time: DateTimeUtc,
    /// Total charged, in dollars; fixed at creation
    pub total_price: f64,
    /// Current rung of the status ladder
    pub status: OrderStatus,
    /// Restaurant the order was placed against
    pub restaurant_id: i32,
    /// Payment that settled the order
    pub payment_id: i32,
}

/// Defines relationships between Order and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each order belongs to one restaurant
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id"
    )]
    Restaurant,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ladder_moves_forward_one_rung() {
        assert_eq!(OrderStatus::Purchased.next(), Some(OrderStatus::Preparing));
        assert_eq!(
            OrderStatus::Preparing.next(),
            Some(OrderStatus::OutForDelivery)
        );
        assert_eq!(
            OrderStatus::OutForDelivery.next(),
            Some(OrderStatus::Delivered)
        );
    }

    #[test]
    fn test_terminal_states_have_no_next() {
        assert_eq!(OrderStatus::Delivered.next(), None);
        assert_eq!(OrderStatus::Cancelled.next(), None);
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Purchased.is_terminal());
    }

    #[test]
    fn test_cancelled_is_not_on_the_ladder() {
        let mut status = OrderStatus::Purchased;
        while let Some(next) = status.next() {
            assert_ne!(next, OrderStatus::Cancelled);
            status = next;
        }
        assert_eq!(status, OrderStatus::Delivered);
    }
}
