//! Cart entity - A customer's in-progress selection of items.
//!
//! A cart is convertible into an order exactly once: order placement locks it
//! to `ReadOnly` and the finalize stage retires it. Its totals are maintained
//! by the cart collaborator so the pipeline can read them without recomputing.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum CartStatus {
    /// The cart accepts changes and may start an order
    #[sea_orm(string_value = "OPEN")]
    Open,
    /// An order is being placed against the cart; no new order may start
    #[sea_orm(string_value = "READ_ONLY")]
    ReadOnly,
}

/// Cart database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "carts")]
pub struct Model {
    /// Unique identifier for the cart
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Customer who owns the cart
    pub customer_id: i32,
    /// Sum over all line totals, in dollars (never negative)
    pub total_price: f64,
    /// Count of items across all lines (never negative)
    pub total_items: i32,
    /// Whether the cart is open for changes or locked for ordering
    pub status: CartStatus,
    /// Optional discount applied at checkout, in dollars
    pub discount: Option<f64>,
}

/// Defines relationships between Cart and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One cart has many line items; their lifetime is bound to the cart
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
