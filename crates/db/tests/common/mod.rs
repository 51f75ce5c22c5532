//! Shared helpers for integration tests.
//!
//! Tests run against an in-memory SQLite database with a single pooled
//! connection (each pooled connection would otherwise see its own empty
//! in-memory database).

use bahi_core::account::{AccountSnapshot, AccountType};
use bahi_db::migration::{Migrator, MigratorTrait};
use bahi_db::repositories::{AccountRepository, CreateAccountInput};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub async fn test_db() -> DatabaseConnection {
    init_tracing();

    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1);

    let db = Database::connect(options)
        .await
        .expect("failed to open in-memory sqlite");
    Migrator::up(&db, None).await.expect("failed to migrate");

    db
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

#[allow(dead_code)]
pub async fn seed_account(
    db: &DatabaseConnection,
    name: &str,
    code: &str,
    account_type: AccountType,
) -> AccountSnapshot {
    AccountRepository::new(db.clone())
        .create(CreateAccountInput {
            name: name.to_string(),
            code: code.to_string(),
            account_type,
        })
        .await
        .expect("failed to seed account")
}
