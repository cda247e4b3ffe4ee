//! # assetgate
//!
//! Access-control and secure-sharing core for asset management platforms.
//!
//! ## Features
//!
//! - **Permission resolution**: role defaults, admin-edited role templates and
//!   additive per-user grants, with an `ADMIN_FULL_ACCESS` wildcard
//! - **Share links**: unguessable bearer links with optional password, expiry
//!   and a download quota that holds under concurrent access
//! - **Audit trail**: every mutation and every share link access is recorded
//! - **Pluggable storage**: in-memory store or SeaORM over SQLite/PostgreSQL
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use assetgate::{AccessServices, Config, MemoryStore, Permission};
//! use assetgate::audit::AccessContext;
//! use assetgate::core::models::{Asset, AssetFile, User, UserRole};
//! use assetgate::sharing::CreateShareLink;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/assetgate.yaml").await?;
//!     let store = Arc::new(MemoryStore::new());
//!
//!     let creator = User::new("creator@example.com", UserRole::ContentCreator);
//!     let asset = Asset::new("Brand guide")
//!         .with_file(AssetFile::new("assets/brand-guide.pdf", "Brand Guide.pdf"));
//!     store.insert_user(creator.clone());
//!     store.insert_asset(asset.clone());
//!
//!     let services = AccessServices::builder(store, config).build()?;
//!     assert!(services.resolver.has_permission(creator.id, Permission::AssetShare).await?);
//!
//!     let created = services
//!         .share_links
//!         .create(
//!             asset.id,
//!             creator.id,
//!             CreateShareLink::default().max_downloads(5),
//!             &AccessContext::default(),
//!         )
//!         .await?;
//!     println!("Share URL: {}", created.url);
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod audit;
pub mod auth;
pub mod config;
pub mod core;
pub mod services;
pub mod sharing;
pub mod storage;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export main types
pub use auth::rbac::{Permission, PermissionResolver};
pub use config::Config;
pub use services::AccessServices;
pub use sharing::ShareLinkManager;
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub use storage::SeaOrmStore;
pub use storage::{AccessStore, MemoryStore};
pub use utils::error::{AccessError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build time, seconds since the epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("ASSETGATE_BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("ASSETGATE_GIT_HASH").unwrap_or("unknown"),
        }
    }
}

/// Build information of this binary
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
