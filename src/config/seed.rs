//! Restaurant and menu seeding from dishpatch.toml.
//!
//! The seed file describes restaurants, their operating windows, and their
//! menus. Seeding is idempotent: a restaurant whose name already exists in
//! the database is skipped, so the binary can run against an existing
//! database without duplicating rows.

use crate::core::{menu, restaurant};
use crate::errors::{Error, Result};
use chrono::NaiveTime;
use sea_orm::DatabaseConnection;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire seed file
#[derive(Debug, Deserialize)]
pub struct SeedConfig {
    /// Restaurants to seed
    pub restaurants: Vec<RestaurantConfig>,
}

/// Configuration for a single restaurant and its menu
#[derive(Debug, Deserialize, Clone)]
pub struct RestaurantConfig {
    /// Display name; also the idempotency key for seeding
    pub name: String,
    /// Daily opening time, "HH:MM"
    pub open: String,
    /// Daily closing time, "HH:MM"; earlier than `open` wraps midnight
    pub close: String,
    /// The restaurant's menu
    #[serde(default)]
    pub menu: Vec<MenuItemConfig>,
}

/// Configuration for a single menu item
#[derive(Debug, Deserialize, Clone)]
pub struct MenuItemConfig {
    /// Display name of the dish
    pub name: String,
    /// Price in dollars
    pub price: f64,
    /// Whether the item starts out orderable
    #[serde(default = "default_available")]
    pub available: bool,
}

fn default_available() -> bool {
    true
}

fn parse_time(value: &str, field: &str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|e| Error::Config {
        message: format!("invalid {field} time '{value}': {e}"),
    })
}

/// Loads the seed configuration from a TOML file.
///
/// # Errors
/// Returns `Error::Config` if the file cannot be read or the TOML is invalid.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SeedConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read seed file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse seed file: {e}"),
    })
}

/// Seeds restaurants and menus, skipping restaurants that already exist.
///
/// Returns the number of restaurants created.
pub async fn seed_restaurants(db: &DatabaseConnection, config: &SeedConfig) -> Result<usize> {
    let mut created = 0;
    for entry in &config.restaurants {
        if restaurant::get_restaurant_by_name(db, &entry.name)
            .await?
            .is_some()
        {
            continue;
        }

        let open = parse_time(&entry.open, "open")?;
        let close = parse_time(&entry.close, "close")?;
        let row = restaurant::create_restaurant(db, entry.name.clone(), open, close).await?;
        for item in &entry.menu {
            menu::create_menu_item(db, row.id, item.name.clone(), item.price, item.available)
                .await?;
        }
        created += 1;
        info!(
            "Seeded restaurant '{}' with {} menu items",
            entry.name,
            entry.menu.len()
        );
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::setup_test_db;

    const SAMPLE: &str = r#"
        [[restaurants]]
        name = "Trattoria Nonna"
        open = "11:00"
        close = "23:00"

        [[restaurants.menu]]
        name = "Margherita"
        price = 9.99

        [[restaurants.menu]]
        name = "Tiramisu"
        price = 5.50
        available = false

        [[restaurants]]
        name = "Night Noodles"
        open = "18:00"
        close = "02:00"
    "#;

    #[test]
    fn test_parse_seed_config() {
        let config: SeedConfig = toml::from_str(SAMPLE).unwrap();
        assert_eq!(config.restaurants.len(), 2);

        let first = &config.restaurants[0];
        assert_eq!(first.name, "Trattoria Nonna");
        assert_eq!(first.menu.len(), 2);
        assert_eq!(first.menu[0].price, 9.99);
        assert!(first.menu[0].available);
        assert!(!first.menu[1].available);

        assert!(config.restaurants[1].menu.is_empty());
    }

    #[test]
    fn test_invalid_time_is_a_config_error() {
        let config: SeedConfig = toml::from_str(
            r#"
            [[restaurants]]
            name = "Broken"
            open = "25:99"
            close = "23:00"
        "#,
        )
        .unwrap();

        let parsed = parse_time(&config.restaurants[0].open, "open");
        assert!(matches!(parsed.unwrap_err(), Error::Config { .. }));
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let config: SeedConfig = toml::from_str(SAMPLE).unwrap();

        assert_eq!(seed_restaurants(&db, &config).await?, 2);
        assert_eq!(seed_restaurants(&db, &config).await?, 0);

        let row = crate::core::restaurant::get_restaurant_by_name(&db, "Night Noodles")
            .await?
            .unwrap();
        assert_eq!(row.open_time, NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        Ok(())
    }
}
