//! Authorization
//!
//! Permission resolution and administration for the access core.

pub mod rbac;

pub use rbac::{Permission, PermissionAdmin, PermissionResolver, RoleTemplateStore};
