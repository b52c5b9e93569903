//! Cart item entity - One line of a cart.
//!
//! Each line references a menu item and carries the quantity and prices the
//! cart totals were computed from. Lines are created and removed by the cart
//! collaborator; the order pipeline only reads them.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Cart line item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cart_items")]
pub struct Model {
    /// Unique identifier for the line
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Cart this line belongs to
    pub cart_id: i32,
    /// Menu item the line refers to
    pub menu_item_id: i32,
    /// Number of units ordered (never negative)
    pub quantity: i32,
    /// Price per unit at the time the line was added, in dollars
    pub unit_price: f64,
    /// quantity x `unit_price`; a missing value is read as 0
    pub total_price: Option<f64>,
}

impl Model {
    /// Line total in dollars, treating a missing value as 0.
    pub fn line_total(&self) -> f64 {
        self.total_price.unwrap_or(0.0)
    }
}

/// Defines relationships between CartItem and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each line belongs to one cart
    #[sea_orm(
        belongs_to = "super::cart::Entity",
        from = "Column::CartId",
        to = "super::cart::Column::Id"
    )]
    Cart,
    /// Each line refers to one menu item
    #[sea_orm(
        belongs_to = "super::menu_item::Entity",
        from = "Column::MenuItemId",
        to = "super::menu_item::Column::Id"
    )]
    MenuItem,
}

impl Related<super::cart::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Cart.def()
    }
}

impl Related<super::menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_line_total_treats_missing_as_zero() {
        let line = Model {
            id: 1,
            cart_id: 1,
            menu_item_id: 1,
            quantity: 2,
            unit_price: 4.50,
            total_price: None,
        };
        assert_eq!(line.line_total(), 0.0);

        let priced = Model {
            total_price: Some(9.00),
            ..line
        };
        assert_eq!(priced.line_total(), 9.00);
    }
}
