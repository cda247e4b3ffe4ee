// Module declarations
mod types;
mod connection;
mod user_ops;
mod asset_ops;
mod role_template_ops;
mod share_link_ops;
mod audit_ops;

// Re-export public types
pub use types::{DatabaseBackendType, SeaOrmStore};
