//! Permission catalog
//!
//! The closed set of permissions, their presentation categories, and the
//! compiled-in default permission set of every role. Categories carry no
//! authorization semantics.

use crate::core::models::UserRole;
use crate::utils::error::AccessError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Named capability a principal may hold
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permission {
    AssetCreate,
    AssetRead,
    AssetUpdate,
    AssetDelete,
    AssetRequestDownload,
    AssetApproveDownload,
    AssetShare,
    ShareLinkManage,
    UserRead,
    UserManage,
    UserManagePermissions,
    RoleTemplateManage,
    ArticleCreate,
    ArticlePublish,
    ProjectRead,
    ProjectManage,
    TaskManage,
    AuditLogRead,
    /// Wildcard: the holder is authorized for every other permission
    AdminFullAccess,
}

/// Presentation grouping of permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionCategory {
    AssetManagement,
    Sharing,
    UserManagement,
    ContentManagement,
    ProjectManagement,
    Administration,
}

struct CatalogEntry {
    permission: Permission,
    name: &'static str,
    category: PermissionCategory,
    description: &'static str,
}

const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        permission: Permission::AssetCreate,
        name: "ASSET_CREATE",
        category: PermissionCategory::AssetManagement,
        description: "Upload and create assets",
    },
    CatalogEntry {
        permission: Permission::AssetRead,
        name: "ASSET_READ",
        category: PermissionCategory::AssetManagement,
        description: "Browse and view assets",
    },
    CatalogEntry {
        permission: Permission::AssetUpdate,
        name: "ASSET_UPDATE",
        category: PermissionCategory::AssetManagement,
        description: "Edit asset metadata and replace files",
    },
    CatalogEntry {
        permission: Permission::AssetDelete,
        name: "ASSET_DELETE",
        category: PermissionCategory::AssetManagement,
        description: "Delete assets",
    },
    CatalogEntry {
        permission: Permission::AssetRequestDownload,
        name: "ASSET_REQUEST_DOWNLOAD",
        category: PermissionCategory::AssetManagement,
        description: "Request download access to an asset",
    },
    CatalogEntry {
        permission: Permission::AssetApproveDownload,
        name: "ASSET_APPROVE_DOWNLOAD",
        category: PermissionCategory::AssetManagement,
        description: "Approve pending download requests",
    },
    CatalogEntry {
        permission: Permission::AssetShare,
        name: "ASSET_SHARE",
        category: PermissionCategory::Sharing,
        description: "Create share links for assets",
    },
    CatalogEntry {
        permission: Permission::ShareLinkManage,
        name: "SHARE_LINK_MANAGE",
        category: PermissionCategory::Sharing,
        description: "Revoke, reactivate and inspect any share link",
    },
    CatalogEntry {
        permission: Permission::UserRead,
        name: "USER_READ",
        category: PermissionCategory::UserManagement,
        description: "View user accounts",
    },
    CatalogEntry {
        permission: Permission::UserManage,
        name: "USER_MANAGE",
        category: PermissionCategory::UserManagement,
        description: "Create, edit and deactivate user accounts",
    },
    CatalogEntry {
        permission: Permission::UserManagePermissions,
        name: "USER_MANAGE_PERMISSIONS",
        category: PermissionCategory::UserManagement,
        description: "Grant additional permissions to users",
    },
    CatalogEntry {
        permission: Permission::RoleTemplateManage,
        name: "ROLE_TEMPLATE_MANAGE",
        category: PermissionCategory::Administration,
        description: "Edit and reset role permission templates",
    },
    CatalogEntry {
        permission: Permission::ArticleCreate,
        name: "ARTICLE_CREATE",
        category: PermissionCategory::ContentManagement,
        description: "Draft articles",
    },
    CatalogEntry {
        permission: Permission::ArticlePublish,
        name: "ARTICLE_PUBLISH",
        category: PermissionCategory::ContentManagement,
        description: "Publish and unpublish articles",
    },
    CatalogEntry {
        permission: Permission::ProjectRead,
        name: "PROJECT_READ",
        category: PermissionCategory::ProjectManagement,
        description: "View projects",
    },
    CatalogEntry {
        permission: Permission::ProjectManage,
        name: "PROJECT_MANAGE",
        category: PermissionCategory::ProjectManagement,
        description: "Create and edit projects",
    },
    CatalogEntry {
        permission: Permission::TaskManage,
        name: "TASK_MANAGE",
        category: PermissionCategory::ProjectManagement,
        description: "Create, assign and close tasks",
    },
    CatalogEntry {
        permission: Permission::AuditLogRead,
        name: "AUDIT_LOG_READ",
        category: PermissionCategory::Administration,
        description: "Read the audit trail",
    },
    CatalogEntry {
        permission: Permission::AdminFullAccess,
        name: "ADMIN_FULL_ACCESS",
        category: PermissionCategory::Administration,
        description: "Full administrative access to every operation",
    },
];

fn entry(permission: Permission) -> &'static CatalogEntry {
    // CATALOG is declared in enum order
    &CATALOG[permission as usize]
}

impl Permission {
    /// Every permission, in declaration order
    pub const ALL: [Permission; 19] = [
        Permission::AssetCreate,
        Permission::AssetRead,
        Permission::AssetUpdate,
        Permission::AssetDelete,
        Permission::AssetRequestDownload,
        Permission::AssetApproveDownload,
        Permission::AssetShare,
        Permission::ShareLinkManage,
        Permission::UserRead,
        Permission::UserManage,
        Permission::UserManagePermissions,
        Permission::RoleTemplateManage,
        Permission::ArticleCreate,
        Permission::ArticlePublish,
        Permission::ProjectRead,
        Permission::ProjectManage,
        Permission::TaskManage,
        Permission::AuditLogRead,
        Permission::AdminFullAccess,
    ];

    /// Stable identifier used in storage and on the wire
    pub fn as_str(&self) -> &'static str {
        entry(*self).name
    }

    pub fn category(&self) -> PermissionCategory {
        entry(*self).category
    }

    pub fn description(&self) -> &'static str {
        entry(*self).description
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Permission::AdminFullAccess)
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Permission {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CATALOG
            .iter()
            .find(|e| e.name == s)
            .map(|e| e.permission)
            .ok_or_else(|| AccessError::bad_request(format!("Unknown permission: {}", s)))
    }
}

impl PermissionCategory {
    pub const ALL: [PermissionCategory; 6] = [
        PermissionCategory::AssetManagement,
        PermissionCategory::Sharing,
        PermissionCategory::UserManagement,
        PermissionCategory::ContentManagement,
        PermissionCategory::ProjectManagement,
        PermissionCategory::Administration,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            PermissionCategory::AssetManagement => "Asset Management",
            PermissionCategory::Sharing => "Sharing",
            PermissionCategory::UserManagement => "User Management",
            PermissionCategory::ContentManagement => "Content Management",
            PermissionCategory::ProjectManagement => "Project Management",
            PermissionCategory::Administration => "Administration",
        }
    }

    pub fn permissions(&self) -> Vec<Permission> {
        CATALOG
            .iter()
            .filter(|e| e.category == *self)
            .map(|e| e.permission)
            .collect()
    }
}

/// Permissions grouped by category, in catalog order
pub fn permissions_by_category() -> Vec<(PermissionCategory, Vec<Permission>)> {
    PermissionCategory::ALL
        .into_iter()
        .map(|category| (category, category.permissions()))
        .collect()
}

/// Compiled-in permission set of a role, used when no template overrides it
pub fn default_role_permissions(role: UserRole) -> BTreeSet<Permission> {
    use Permission::*;

    match role {
        UserRole::Admin => Permission::ALL.into_iter().collect(),
        UserRole::Moderator => [
            AssetRead,
            AssetUpdate,
            AssetApproveDownload,
            AssetShare,
            ShareLinkManage,
            ArticlePublish,
            UserRead,
            AuditLogRead,
        ]
        .into_iter()
        .collect(),
        UserRole::ContentCreator => [
            AssetCreate,
            AssetRead,
            AssetUpdate,
            AssetShare,
            ArticleCreate,
            ProjectRead,
        ]
        .into_iter()
        .collect(),
        UserRole::ProjectManager => [
            AssetRead,
            AssetShare,
            ProjectRead,
            ProjectManage,
            TaskManage,
            UserRead,
        ]
        .into_iter()
        .collect(),
        UserRole::Client => [AssetRead, AssetRequestDownload].into_iter().collect(),
    }
}

/// Parse stored permission names, dropping the ones the catalog does not know
///
/// Unknown names are never treated as held.
pub fn parse_permission_names<I, S>(names: I) -> BTreeSet<Permission>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| match name.as_ref().parse::<Permission>() {
            Ok(permission) => Some(permission),
            Err(_) => {
                tracing::warn!("Ignoring unknown permission '{}'", name.as_ref());
                None
            }
        })
        .collect()
}
