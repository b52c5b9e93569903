/// Database configuration and connection management
pub mod database;

/// Restaurant and menu seeding from dishpatch.toml
pub mod seed;
