/// Asset entity module
pub mod asset;
/// Audit log entity module
pub mod audit_log;
/// Role template entity module
pub mod role_template;
/// Share access log entity module
pub mod share_access_log;
/// Share link entity module
pub mod share_link;
/// User entity module
pub mod user;

pub use asset::Entity as Asset;
pub use audit_log::Entity as AuditLog;
pub use role_template::Entity as RoleTemplate;
pub use share_access_log::Entity as ShareAccessLog;
pub use share_link::Entity as ShareLink;
pub use user::Entity as User;

use crate::auth::rbac::{Permission, parse_permission_names};
use crate::utils::error::Result;
use std::collections::BTreeSet;

/// Stored form of a permission set: JSON array of names
pub(crate) fn permissions_to_json(permissions: &BTreeSet<Permission>) -> sea_orm::JsonValue {
    sea_orm::JsonValue::Array(
        permissions
            .iter()
            .map(|p| sea_orm::JsonValue::String(p.as_str().to_string()))
            .collect(),
    )
}

/// Unknown names are dropped, never granted
pub(crate) fn permissions_from_json(value: sea_orm::JsonValue) -> Result<BTreeSet<Permission>> {
    let names: Vec<String> = serde_json::from_value(value)?;
    Ok(parse_permission_names(names))
}
