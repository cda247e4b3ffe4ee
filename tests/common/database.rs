//! Test database utilities
//!
//! Provides an in-memory SQLite store for testing without external
//! dependencies. Each test gets an isolated database instance.

use super::fixtures::test_config;
use assetgate::config::DatabaseConfig;
use assetgate::core::models::{Asset, User};
use assetgate::utils::ManualClock;
use assetgate::{AccessServices, SeaOrmStore};
use std::sync::Arc;

/// Test database wrapper providing isolated in-memory SQLite instances
#[derive(Debug, Clone)]
pub struct TestDatabase {
    inner: Arc<SeaOrmStore>,
}

impl TestDatabase {
    /// Create a new in-memory store with migrations applied
    pub async fn new() -> Self {
        let store = SeaOrmStore::connect(&test_db_config())
            .await
            .expect("Failed to create in-memory test database");

        store
            .migrate()
            .await
            .expect("Failed to run database migrations");

        Self {
            inner: Arc::new(store),
        }
    }

    /// Get reference to the underlying store
    pub fn store(&self) -> &SeaOrmStore {
        &self.inner
    }

    /// Get Arc to the underlying store
    pub fn store_arc(&self) -> Arc<SeaOrmStore> {
        Arc::clone(&self.inner)
    }

    /// Services over this store, driven by a manual clock
    pub fn services(&self, clock: Arc<ManualClock>) -> AccessServices {
        AccessServices::builder(self.store_arc(), test_config())
            .clock(clock)
            .build()
            .expect("Failed to build services")
    }

    /// Persist a user and return it
    pub async fn user(&self, user: User) -> User {
        self.inner
            .create_user(&user)
            .await
            .expect("Failed to insert user");
        user
    }

    /// Persist an asset and return it
    pub async fn asset(&self, asset: Asset) -> Asset {
        self.inner
            .create_asset(&asset)
            .await
            .expect("Failed to insert asset");
        asset
    }
}

/// In-memory databases only survive on a single connection
pub fn test_db_config() -> DatabaseConfig {
    DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        connection_timeout: 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_database_creation() {
        let db = TestDatabase::new().await;
        assert!(db.store().health_check().await.is_ok());
    }

    #[tokio::test]
    async fn test_no_pending_migrations_after_setup() {
        let db = TestDatabase::new().await;
        let pending = db.store().pending_migrations().await.unwrap();
        assert!(pending.is_empty(), "Unexpected pending migrations: {:?}", pending);
    }
}
