//! Database schema.
//!
//! The tables live in the workspace `migrations/` directory and are embedded
//! here so the binary can bring a fresh database up to date on startup.

use sqlx::migrate::Migrator;

/// Embedded schema migrations.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");
