//! Service bootstrap: provisions the dishpatch database.
//!
//! Initializes tracing, loads `.env`, connects to the database, creates the
//! schema, and seeds restaurants and menus from `dishpatch.toml` when the
//! file is present. The HTTP surface is deliberately separate; this binary
//! only prepares a database ready to take orders.

use dishpatch::config;
use dishpatch::errors::Result;
use dotenvy::dotenv;
use std::path::Path;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SEED_FILE: &str = "dishpatch.toml";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Connect and ensure the schema exists
    let db = config::database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    config::database::create_tables(&db)
        .await
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 4. Seed restaurants and menus, if a seed file is present
    if Path::new(SEED_FILE).exists() {
        let seed = config::seed::load_config(SEED_FILE)?;
        let created = config::seed::seed_restaurants(&db, &seed)
            .await
            .inspect_err(|e| error!("Failed to seed restaurants: {e}"))?;
        info!("Seeded {created} new restaurants from {SEED_FILE}.");
    } else {
        info!("No {SEED_FILE} found, skipping seeding.");
    }

    info!("Database is ready to take orders.");
    Ok(())
}
