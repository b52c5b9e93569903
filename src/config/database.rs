//! Database configuration module.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. Tables
//! are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the database schema always matches
//! the Rust struct definitions without hand-written SQL.

use crate::entities::{Cart, CartItem, MenuItem, Order, Payment, Restaurant};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the environment or returns the default
/// `SQLite` path.
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://data/dishpatch.sqlite".to_string())
}

/// Establishes the database connection using `DATABASE_URL`, falling back to
/// a local `SQLite` file.
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let restaurant_table = schema.create_table_from_entity(Restaurant);
    let menu_item_table = schema.create_table_from_entity(MenuItem);
    let cart_table = schema.create_table_from_entity(Cart);
    let cart_item_table = schema.create_table_from_entity(CartItem);
    let payment_table = schema.create_table_from_entity(Payment);
    let order_table = schema.create_table_from_entity(Order);

    db.execute(builder.build(&restaurant_table)).await?;
    db.execute(builder.build(&menu_item_table)).await?;
    db.execute(builder.build(&cart_table)).await?;
    db.execute(builder.build(&cart_item_table)).await?;
    db.execute(builder.build(&payment_table)).await?;
    db.execute(builder.build(&order_table)).await?;

    Ok(())
}
