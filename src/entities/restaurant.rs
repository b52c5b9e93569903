//! Restaurant entity - Operating schedule and identity.
//!
//! The pipeline only reads restaurants; the schedule check reduces to
//! [`Model::is_open_at`]. Overnight windows (close before open) wrap midnight.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Restaurant database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "restaurants")]
pub struct Model {
    /// Unique identifier for the restaurant
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Display name of the restaurant
    pub name: String,
    /// Daily opening time
    pub open_time: Time,
    /// Daily closing time; earlier than `open_time` means open past midnight
    pub close_time: Time,
}

impl Model {
    /// Whether the restaurant accepts orders at the given time of day.
    ///
    /// A window with `open_time == close_time` is treated as closed all day.
    pub fn is_open_at(&self, at: Time) -> bool {
        if self.open_time <= self.close_time {
            self.open_time <= at && at < self.close_time
        } else {
            // Overnight window, e.g. 18:00 - 02:00
            at >= self.open_time || at < self.close_time
        }
    }
}

/// Defines relationships between Restaurant and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One restaurant offers many menu items
    #[sea_orm(has_many = "super::menu_item::Entity")]
    MenuItems,
    /// Orders placed against this restaurant
    #[sea_orm(has_many = "super::order::Entity")]
    Orders,
}

impl Related<super::menu_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MenuItems.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn restaurant(open: (u32, u32), close: (u32, u32)) -> Model {
        Model {
            id: 1,
            name: "Test Kitchen".to_string(),
            open_time: NaiveTime::from_hms_opt(open.0, open.1, 0).unwrap(),
            close_time: NaiveTime::from_hms_opt(close.0, close.1, 0).unwrap(),
        }
    }

    fn at(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_daytime_window() {
        let r = restaurant((9, 0), (22, 0));
        assert!(r.is_open_at(at(9, 0)));
        assert!(r.is_open_at(at(12, 30)));
        assert!(!r.is_open_at(at(22, 0)));
        assert!(!r.is_open_at(at(3, 0)));
    }

    #[test]
    fn test_overnight_window_wraps_midnight() {
        let r = restaurant((18, 0), (2, 0));
        assert!(r.is_open_at(at(18, 0)));
        assert!(r.is_open_at(at(23, 59)));
        assert!(r.is_open_at(at(1, 59)));
        assert!(!r.is_open_at(at(2, 0)));
        assert!(!r.is_open_at(at(12, 0)));
    }

    #[test]
    fn test_degenerate_window_is_always_closed() {
        let r = restaurant((10, 0), (10, 0));
        assert!(!r.is_open_at(at(10, 0)));
        assert!(!r.is_open_at(at(15, 0)));
    }
}
