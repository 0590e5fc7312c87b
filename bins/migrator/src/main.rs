//! Database migration runner for Thaibooks.
//!
//! Reads `DATABASE_URL` (or `--database-url`).
//!
//! Usage:
//!   migrator up      - Create the monthly_closes table
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations

use sea_orm_migration::prelude::*;
use thaibooks_db::migration::Migrator;

#[tokio::main]
async fn main() {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // The migrator CLI sets up its own tracing
    cli::run_cli(Migrator).await;
}
