//! Storage configuration management.

use sea_orm::{ConnectOptions, Database, DatabaseConnection, DbErr};
use serde::Deserialize;

/// Storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Database connection URL (Postgres or SQLite).
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

impl StorageConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Layering: `config/storage.*` file (optional), then `BAHI`-prefixed
    /// environment variables (e.g. `BAHI__URL`). A `.env` file is read
    /// first if present.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or deserialized.
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let _ = dotenvy::dotenv();

        let config = ::config::Config::builder()
            .add_source(::config::File::with_name("config/storage").required(false))
            .add_source(::config::Environment::with_prefix("BAHI").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Opens a connection pool using this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be established.
    pub async fn connect(&self) -> Result<DatabaseConnection, DbErr> {
        let mut options = ConnectOptions::new(&self.url);
        options
            .max_connections(self.max_connections)
            .min_connections(self.min_connections);

        Database::connect(options).await
    }
}
