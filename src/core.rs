//! Core RowHaus functionality
//!
//! This module contains the main RowHaus struct, which owns the database
//! pool and hands out repositories bound to it.

use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::RowHausError;
use crate::sqlite::SqliteConnector;
use config::{AppConfig, DatabaseConfig};
use entity_mapper::{ConnectionProvider, Entity, Repository};

/// Main RowHaus coordinator that manages the database pool
#[derive(Debug, Clone)]
pub struct RowHaus {
    pool: SqlitePool,
}

impl RowHaus {
    /// Create new RowHaus with database connection
    pub async fn new(config: DatabaseConfig) -> Result<Self, RowHausError> {
        config.validate()?;

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds));

        // Zero keeps connections open for the life of the pool
        pool_options = pool_options.idle_timeout(
            (config.idle_timeout_seconds > 0)
                .then(|| Duration::from_secs(config.idle_timeout_seconds)),
        );
        pool_options = pool_options.max_lifetime(
            (config.max_lifetime_seconds > 0)
                .then(|| Duration::from_secs(config.max_lifetime_seconds)),
        );

        crate::debug_log!("Opening SQLite pool at {}", config.url);
        let pool = pool_options.connect(&config.url).await?;

        Ok(Self { pool })
    }

    /// Create RowHaus from the configuration file found by `AppConfig::load`
    pub async fn from_env() -> Result<Self, RowHausError> {
        let config = AppConfig::load()?;
        Self::new(config.database).await
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get database pool reference
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Connection collaborator backed by this pool
    pub fn connector(&self) -> Arc<dyn ConnectionProvider> {
        Arc::new(SqliteConnector::new(self.pool.clone()))
    }

    /// Repository for `T` running against this pool
    pub fn repository<T: Entity>(&self) -> Repository<T> {
        Repository::new(self.connector())
    }

    /// Check database connection health
    pub async fn health_check(&self) -> Result<(), RowHausError> {
        sqlx::query("SELECT 1").fetch_one(&self.pool).await?;
        Ok(())
    }
}
