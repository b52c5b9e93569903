//! Menu item entity - A dish a restaurant offers.
//!
//! The availability flag is what the items-availability stage checks; a kitchen
//! running out of an ingredient flips it off without removing the row.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Menu item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu_items")]
pub struct Model {
    /// Unique identifier for the menu item
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Restaurant whose menu this item belongs to
    pub restaurant_id: i32,
    /// Display name of the dish
    pub name: String,
    /// Current price in dollars
    pub price: f64,
    /// Whether the item can currently be ordered
    pub available: bool,
}

/// Defines relationships between MenuItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each menu item belongs to one restaurant
    #[sea_orm(
        belongs_to = "super::restaurant::Entity",
        from = "Column::RestaurantId",
        to = "super::restaurant::Column::Id"
    )]
    Restaurant,
    /// Cart lines referencing this item
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItems,
}

impl Related<super::restaurant::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Restaurant.def()
    }
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItems.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
