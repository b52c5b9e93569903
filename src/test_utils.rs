//! Shared test utilities for `dishpatch`.
//!
//! Common helpers for setting up in-memory test databases and creating test
//! entities with sensible defaults.

use crate::{
    core::{cart, menu, order, restaurant},
    entities,
    errors::Result,
    pipeline::{CartLockRegistry, OrderLine, OrderRequest, StaticGateway},
};
use chrono::NaiveTime;
use sea_orm::{ConnectOptions, DatabaseConnection};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
///
/// Uses a uniquely named shared-cache in-memory database so the pool can hold
/// more than one connection to the same database; a plain `sqlite::memory:`
/// pool is capped at a single connection, which deadlocks tests that query
/// the pool while a transaction is open.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    static DB_COUNTER: AtomicUsize = AtomicUsize::new(0);
    let db_id = DB_COUNTER.fetch_add(1, Ordering::Relaxed);
    let mut options = ConnectOptions::new(format!(
        "sqlite:file:dishpatch_test_{db_id}?mode=memory&cache=shared"
    ));
    options.max_connections(2).min_connections(1);
    let db = sea_orm::Database::connect(options).await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a restaurant that is open around the clock, so hours checks pass
/// regardless of when the test runs.
pub async fn create_test_restaurant(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::restaurant::Model> {
    restaurant::create_restaurant(
        db,
        name.to_string(),
        NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default(),
        NaiveTime::from_hms_opt(23, 59, 59).unwrap_or_default(),
    )
    .await
}

/// Creates a restaurant with a degenerate operating window (open == close),
/// which reads as closed at every time of day.
pub async fn create_closed_restaurant(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::restaurant::Model> {
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default();
    restaurant::create_restaurant(db, name.to_string(), midnight, midnight).await
}

/// Creates an available menu item with the given price.
pub async fn create_test_menu_item(
    db: &DatabaseConnection,
    restaurant_id: i32,
    name: &str,
    price: f64,
) -> Result<entities::menu_item::Model> {
    menu::create_menu_item(db, restaurant_id, name.to_string(), price, true).await
}

/// Sets up a database with an always-open restaurant.
pub async fn setup_with_restaurant() -> Result<(DatabaseConnection, entities::restaurant::Model)> {
    let db = setup_test_db().await?;
    let restaurant = create_test_restaurant(&db, "Test Kitchen").await?;
    Ok((db, restaurant))
}

/// Sets up a database with an open restaurant and a two-line cart for
/// customer 1 (2x a 5.00 dish plus 1x a 2.50 side, totaling 12.50).
pub async fn setup_with_cart() -> Result<(
    DatabaseConnection,
    entities::restaurant::Model,
    entities::cart::Model,
)> {
    let (db, restaurant) = setup_with_restaurant().await?;
    let dish = create_test_menu_item(&db, restaurant.id, "Test Dish", 5.00).await?;
    let side = create_test_menu_item(&db, restaurant.id, "Test Side", 2.50).await?;
    let cart = cart::create_cart(&db, 1, &[(dish.id, 2), (side.id, 1)]).await?;
    Ok((db, restaurant, cart))
}

/// Reads a cart's stored lines back as request lines, so requests built in
/// tests agree with the cart by construction.
pub async fn request_lines(db: &DatabaseConnection, cart_id: i32) -> Result<Vec<OrderLine>> {
    Ok(cart::get_cart_items(db, cart_id)
        .await?
        .into_iter()
        .map(|line| OrderLine {
            menu_item_id: line.menu_item_id,
            quantity: line.quantity,
        })
        .collect())
}

/// Builds a valid order request for the given restaurant and cart.
pub async fn sample_request(
    db: &DatabaseConnection,
    restaurant: &entities::restaurant::Model,
    cart: &entities::cart::Model,
) -> Result<OrderRequest> {
    Ok(OrderRequest {
        customer_id: cart.customer_id,
        restaurant_id: restaurant.id,
        delivery_id: 1,
        cart_id: cart.id,
        items: request_lines(db, cart.id).await?,
        delivery_address: "42 Sample Street".to_string(),
    })
}

/// Sets up a database with one successfully placed order.
/// Returns (db, order) for lifecycle tests.
pub async fn setup_with_order() -> Result<(DatabaseConnection, entities::order::Model)> {
    let (db, restaurant, cart) = setup_with_cart().await?;
    let locks = CartLockRegistry::new();
    let request = sample_request(&db, &restaurant, &cart).await?;
    let response = order::create_order(
        &db,
        &locks,
        Arc::new(StaticGateway::approving()),
        request,
    )
    .await?;
    let placed = order::get_order(&db, response.order_id.unwrap_or_default()).await?;
    Ok((db, placed))
}
