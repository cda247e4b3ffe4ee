//! Storage layer for the access core
//!
//! Repository traits, the in-memory store, the SeaORM store and the object
//! storage locator.

/// SeaORM database storage
#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub mod database;
/// Object storage locators
pub mod locator;
/// In-memory store
pub mod memory;
/// Repository traits
pub mod traits;

#[cfg(any(feature = "sqlite", feature = "postgres"))]
pub use database::SeaOrmStore;
pub use locator::{LocatorPurpose, ObjectLocator, ResourceLocator, SignedUrlLocator};
pub use memory::MemoryStore;
pub use traits::{
    AccessLogRepository, AccessStore, AssetRepository, AuditLogRepository,
    RoleTemplateRepository, ShareLinkRepository, UserRepository,
};
