use crate::config::DatabaseConfig;
use crate::utils::error::{AccessError, Result};
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::*;
use sea_orm_migration::MigratorTrait;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::super::migration::Migrator;
use super::types::{DatabaseBackendType, SeaOrmStore};

impl SeaOrmStore {
    /// Connect using the configured URL
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut opt = ConnectOptions::new(config.url.clone());
        opt.max_connections(config.max_connections)
            .min_connections(1)
            .connect_timeout(Duration::from_secs(config.connection_timeout))
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(3600))
            .sqlx_logging(true)
            .sqlx_logging_level(log::LevelFilter::Debug);

        let db = Database::connect(opt)
            .await
            .map_err(AccessError::Database)?;

        let store = Self::from_connection(db);
        info!("Database connection established ({:?})", store.backend_type);
        Ok(store)
    }

    /// Wrap an existing connection
    pub fn from_connection(db: DatabaseConnection) -> Self {
        let backend_type = match db.get_database_backend() {
            DbBackend::Postgres => DatabaseBackendType::PostgreSQL,
            _ => DatabaseBackendType::SQLite,
        };
        Self { db, backend_type }
    }

    /// Get the current backend type
    pub fn backend_type(&self) -> DatabaseBackendType {
        self.backend_type
    }

    /// Underlying connection
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        info!("Running database migrations...");
        Migrator::up(&self.db, None).await.map_err(|e| {
            warn!("Migration failed: {}", e);
            AccessError::Database(e)
        })?;
        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Migrations not yet applied
    pub async fn pending_migrations(&self) -> Result<Vec<String>> {
        let pending = Migrator::get_pending_migrations(&self.db)
            .await
            .map_err(AccessError::Database)?;
        Ok(pending.iter().map(|m| m.name().to_string()).collect())
    }

    /// Health check
    pub async fn health_check(&self) -> Result<()> {
        debug!("Performing database health check");
        self.db.ping().await.map_err(AccessError::Database)
    }
}

/// Unique-key violations surface as `Conflict`
pub(super) fn map_insert_error(e: DbErr, conflict_message: &str) -> AccessError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AccessError::conflict(conflict_message),
        _ => AccessError::Database(e),
    }
}

/// Timestamps are stored with a zero offset
pub(super) fn db_time(at: DateTime<Utc>) -> DateTime<FixedOffset> {
    at.into()
}
