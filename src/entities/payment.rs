//! Payment entity - The charge taken for an order.
//!
//! A payment is created by the payment stage before the order it pays for
//! exists; the finalize stage sets `order_id` afterwards. The back-reference is
//! not ownership: the order is the terminal owner of the link.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Settlement status of a payment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PaymentStatus {
    /// The gateway authorized the charge; no order is linked yet
    #[sea_orm(string_value = "AUTHORIZED")]
    Authorized,
    /// The charge is tied to a finalized order
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
}

/// Payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Charged amount in dollars; equals the cart total it was taken for
    pub amount: f64,
    /// Authorization/settlement state
    pub status: PaymentStatus,
    /// Order this payment ended up paying for, set by the finalize stage
    pub order_id: Option<i32>,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Back-reference to the order the payment settles
    #[sea_orm(
        belongs_to = "super::order::Entity",
        from = "Column::OrderId",
        to = "super::order::Column::Id"
    )]
    Order,
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
