//! Restaurant business logic - Lookups and schedule queries.
//!
//! The schedule itself lives on the entity ([`crate::entities::restaurant::Model::is_open_at`]);
//! this module provides the collaborator contract the pipeline and seeding use.

use crate::{
    entities::{Restaurant, restaurant},
    errors::Result,
};
use chrono::NaiveTime;
use sea_orm::{Set, prelude::*};
use tracing::debug;

/// Finds a restaurant by its unique ID, returning `None` if it does not exist.
pub async fn get_restaurant_by_id<C>(
    conn: &C,
    restaurant_id: i32,
) -> Result<Option<restaurant::Model>>
where
    C: ConnectionTrait,
{
    Restaurant::find_by_id(restaurant_id)
        .one(conn)
        .await
        .map_err(Into::into)
}

/// Finds a restaurant by name, used by seeding to keep startup idempotent.
pub async fn get_restaurant_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<restaurant::Model>> {
    Restaurant::find()
        .filter(restaurant::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Registers a restaurant with its daily operating window.
pub async fn create_restaurant(
    db: &DatabaseConnection,
    name: String,
    open_time: NaiveTime,
    close_time: NaiveTime,
) -> Result<restaurant::Model> {
    let restaurant = restaurant::ActiveModel {
        name: Set(name),
        open_time: Set(open_time),
        close_time: Set(close_time),
        ..Default::default()
    }
    .insert(db)
    .await?;
    debug!(
        "Created restaurant {} ('{}'), open {} - {}",
        restaurant.id, restaurant.name, restaurant.open_time, restaurant.close_time
    );
    Ok(restaurant)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_create_and_find_restaurant() -> Result<()> {
        let db = setup_test_db().await?;
        let open = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let close = NaiveTime::from_hms_opt(22, 0, 0).unwrap();

        let created = create_restaurant(&db, "Luigi's".to_string(), open, close).await?;
        let found = get_restaurant_by_id(&db, created.id).await?.unwrap();
        assert_eq!(found, created);
        assert_eq!(found.open_time, open);

        let by_name = get_restaurant_by_name(&db, "Luigi's").await?.unwrap();
        assert_eq!(by_name.id, created.id);
        assert!(get_restaurant_by_name(&db, "Mario's").await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_find_missing_restaurant() -> Result<()> {
        let db = setup_test_db().await?;
        assert!(get_restaurant_by_id(&db, 77).await?.is_none());
        Ok(())
    }
}
