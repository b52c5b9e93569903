//! Menu business logic - Handles menu item lookups and availability.
//!
//! Menus are owned by restaurant operations; the pipeline treats them as
//! read-only and only asks one question: does this item exist and can it be
//! ordered right now?

use crate::{
    entities::{MenuItem, menu_item},
    errors::{Error, Result},
};
use sea_orm::{Set, prelude::*};
use tracing::debug;

/// Finds a menu item by its unique ID, returning `None` if it does not exist.
pub async fn get_menu_item_by_id<C>(conn: &C, menu_item_id: i32) -> Result<Option<menu_item::Model>>
where
    C: ConnectionTrait,
{
    MenuItem::find_by_id(menu_item_id)
        .one(conn)
        .await
        .map_err(Into::into)
}

/// Whether a menu item exists and is currently orderable.
///
/// A missing item counts as unavailable; the availability-check stage treats
/// both the same way.
pub async fn is_available<C>(conn: &C, menu_item_id: i32) -> Result<bool>
where
    C: ConnectionTrait,
{
    Ok(get_menu_item_by_id(conn, menu_item_id)
        .await?
        .is_some_and(|item| item.available))
}

/// Adds an item to a restaurant's menu.
pub async fn create_menu_item(
    db: &DatabaseConnection,
    restaurant_id: i32,
    name: String,
    price: f64,
    available: bool,
) -> Result<menu_item::Model> {
    let item = menu_item::ActiveModel {
        restaurant_id: Set(restaurant_id),
        name: Set(name),
        price: Set(price),
        available: Set(available),
        ..Default::default()
    }
    .insert(db)
    .await?;
    debug!(
        "Created menu item {} ('{}') for restaurant {}",
        item.id, item.name, restaurant_id
    );
    Ok(item)
}

/// Flips the availability flag of a menu item, e.g. when the kitchen runs out.
///
/// # Errors
/// Returns `Error::NotFound` if the menu item does not exist.
pub async fn set_availability(
    db: &DatabaseConnection,
    menu_item_id: i32,
    available: bool,
) -> Result<menu_item::Model> {
    let item = get_menu_item_by_id(db, menu_item_id)
        .await?
        .ok_or(Error::NotFound {
            entity: "menu item",
            id: menu_item_id,
        })?;

    let mut active: menu_item::ActiveModel = item.into();
    active.available = Set(available);
    active.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::Error;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_is_available_lifecycle() -> Result<()> {
        let (db, restaurant) = setup_with_restaurant().await?;
        let item = create_test_menu_item(&db, restaurant.id, "Ramen", 11.00).await?;

        assert!(is_available(&db, item.id).await?);

        set_availability(&db, item.id, false).await?;
        assert!(!is_available(&db, item.id).await?);

        set_availability(&db, item.id, true).await?;
        assert!(is_available(&db, item.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_item_counts_as_unavailable() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(!is_available(&db, 12345).await?);
        Ok(())
    }

    #[tokio::test]
    async fn test_set_availability_missing_item() -> Result<()> {
        let db = setup_test_db().await?;
        let result = set_availability(&db, 9, false).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::NotFound {
                entity: "menu item",
                id: 9
            }
        ));
        Ok(())
    }
}
