//! Role-Based Access Control
//!
//! Permission catalog, role templates, the permission resolver and the
//! audited admin operations on top of them.

pub mod admin;
pub mod catalog;
pub mod resolver;
pub mod templates;
pub mod types;


pub use admin::PermissionAdmin;
pub use catalog::{
    Permission, PermissionCategory, default_role_permissions, parse_permission_names,
    permissions_by_category,
};
pub use resolver::PermissionResolver;
pub use templates::RoleTemplateStore;
pub use types::{
    GrantSource, PermissionCheck, ResolvedPermissions, RolePermissions, RoleTemplateInput,
    RoleTemplateView,
};
