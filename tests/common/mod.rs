//! Common test utilities for assetgate
//!
//! - In-memory SQLite database support
//! - Fixtures and data factories
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{TestDatabase, UserFactory};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let db = TestDatabase::new().await;
//!     let admin = db.user(UserFactory::admin()).await;
//!     // ...
//! }
//! ```

#[cfg(feature = "sqlite")]
pub mod database;
pub mod fixtures;

#[cfg(feature = "sqlite")]
pub use database::TestDatabase;
pub use fixtures::{AssetFactory, UserFactory, request_context, test_config};
