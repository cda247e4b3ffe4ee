//! RBAC configuration

use crate::core::models::UserRole;
use serde::{Deserialize, Serialize};

/// RBAC configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Roles treated as administrators for share-link management
    #[serde(default = "default_admin_roles")]
    pub admin_roles: Vec<UserRole>,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            admin_roles: default_admin_roles(),
        }
    }
}

fn default_admin_roles() -> Vec<UserRole> {
    vec![UserRole::Admin]
}
