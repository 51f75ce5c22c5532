//! Storage layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions (behavior-free row mappings)
//! - Database migrations (Postgres for the hosted deployment, SQLite for
//!   embedded/in-process use)
//! - Repository abstractions owning the atomic double-entry unit of work

pub mod config;
pub mod entities;
pub mod migration;
pub mod repositories;
pub mod retry;

pub use config::StorageConfig;
pub use repositories::{
    AccountRepository, InvoiceRepository, LedgerRepository, SchemeRepository,
};
pub use retry::RetryPolicy;

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
