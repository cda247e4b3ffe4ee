//! RBAC result types

use super::catalog::Permission;
use crate::core::models::UserRole;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Effective permission set of one user, computed fresh on every call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPermissions {
    pub user_id: Uuid,
    pub role: UserRole,
    /// Template permissions, or the role defaults when no template exists
    pub role_permissions: BTreeSet<Permission>,
    pub additional_permissions: BTreeSet<Permission>,
    /// Union of role and additional permissions
    pub all_permissions: BTreeSet<Permission>,
    /// Whether a stored template replaced the role defaults
    pub template_applied: bool,
}

impl ResolvedPermissions {
    pub fn new(
        user_id: Uuid,
        role: UserRole,
        role_permissions: BTreeSet<Permission>,
        additional_permissions: BTreeSet<Permission>,
        template_applied: bool,
    ) -> Self {
        let all_permissions = role_permissions
            .union(&additional_permissions)
            .copied()
            .collect();
        Self {
            user_id,
            role,
            role_permissions,
            additional_permissions,
            all_permissions,
            template_applied,
        }
    }

    /// Whether the holder holds the wildcard
    pub fn has_full_access(&self) -> bool {
        self.all_permissions.contains(&Permission::AdminFullAccess)
    }

    /// Membership check honouring the wildcard
    pub fn has(&self, permission: Permission) -> bool {
        self.has_full_access() || self.all_permissions.contains(&permission)
    }

    /// Where a held permission comes from
    pub fn grant_source(&self, permission: Permission) -> Option<GrantSource> {
        if self.role_permissions.contains(&permission) {
            Some(GrantSource::Role)
        } else if self.additional_permissions.contains(&permission) {
            Some(GrantSource::Additional)
        } else if self.has_full_access() {
            Some(GrantSource::Wildcard)
        } else {
            None
        }
    }
}

/// Origin of a granted permission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantSource {
    /// Role template or role defaults
    Role,
    /// Per-user grant
    Additional,
    /// Implied by `ADMIN_FULL_ACCESS`
    Wildcard,
}

/// Permission check result with provenance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionCheck {
    pub permission: Permission,
    pub granted: bool,
    pub granted_by: Option<GrantSource>,
    pub denial_reason: Option<String>,
}

impl PermissionCheck {
    pub fn from_resolved(resolved: &ResolvedPermissions, permission: Permission) -> Self {
        match resolved.grant_source(permission) {
            Some(source) => Self {
                permission,
                granted: true,
                granted_by: Some(source),
                denial_reason: None,
            },
            None => Self {
                permission,
                granted: false,
                granted_by: None,
                denial_reason: Some(format!(
                    "Role {} does not grant {} and no additional grant exists",
                    resolved.role, permission
                )),
            },
        }
    }
}

/// Permission set of a role as currently configured
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermissions {
    pub permissions: BTreeSet<Permission>,
    pub template_applied: bool,
}

/// One role as shown on the template admin screen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTemplateView {
    pub role: UserRole,
    pub permissions: BTreeSet<Permission>,
    /// Whether a stored template overrides the defaults
    pub customized: bool,
    pub description: Option<String>,
    pub category: Option<String>,
    pub updated_by: Option<Uuid>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Admin input for saving a role template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTemplateInput {
    pub role: UserRole,
    pub permissions: BTreeSet<Permission>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl RoleTemplateInput {
    pub fn new<I>(role: UserRole, permissions: I) -> Self
    where
        I: IntoIterator<Item = Permission>,
    {
        Self {
            role,
            permissions: permissions.into_iter().collect(),
            description: None,
            category: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
