//! Permission resolver
//!
//! Computes a user's effective permissions from the role template (or role
//! defaults) plus the user's additional grants, and answers permission
//! checks against that set. Nothing is cached; every call reads the store.

use super::catalog::Permission;
use super::templates::RoleTemplateStore;
use super::types::{PermissionCheck, ResolvedPermissions};
use crate::config::RbacConfig;
use crate::core::models::User;
use crate::storage::UserRepository;
use crate::utils::error::{AccessError, Result};
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

pub struct PermissionResolver {
    users: Arc<dyn UserRepository>,
    templates: Arc<RoleTemplateStore>,
    config: RbacConfig,
}

impl PermissionResolver {
    pub fn new(
        users: Arc<dyn UserRepository>,
        templates: Arc<RoleTemplateStore>,
        config: RbacConfig,
    ) -> Self {
        Self {
            users,
            templates,
            config,
        }
    }

    async fn load_user(&self, user_id: Uuid) -> Result<User> {
        self.users
            .find_user(user_id)
            .await?
            .ok_or_else(|| AccessError::not_found(format!("User {} not found", user_id)))
    }

    /// Effective permission set of a user
    pub async fn resolve(&self, user_id: Uuid) -> Result<ResolvedPermissions> {
        let user = self.load_user(user_id).await?;
        self.resolve_user(user).await
    }

    /// Effective permission set of an already loaded user
    pub async fn resolve_user(&self, user: User) -> Result<ResolvedPermissions> {
        let role_permissions = self.templates.role_permissions(user.role).await?;

        let resolved = ResolvedPermissions::new(
            user.id,
            user.role,
            role_permissions.permissions,
            user.additional_permissions,
            role_permissions.template_applied,
        );
        debug!(
            "Resolved {} permissions for user {} (role {}, template {})",
            resolved.all_permissions.len(),
            resolved.user_id,
            resolved.role,
            resolved.template_applied
        );
        Ok(resolved)
    }

    pub async fn has_permission(&self, user_id: Uuid, permission: Permission) -> Result<bool> {
        Ok(self.resolve(user_id).await?.has(permission))
    }

    /// Check by stored name. Names outside the catalog are never granted.
    pub async fn has_permission_named(&self, user_id: Uuid, name: &str) -> Result<bool> {
        let resolved = self.resolve(user_id).await?;
        match name.parse::<Permission>() {
            Ok(permission) => Ok(resolved.has(permission)),
            Err(_) => {
                warn!(
                    "Permission check for unknown permission '{}' denied for user {}",
                    name, user_id
                );
                Ok(false)
            }
        }
    }

    /// True when every permission is held; true for an empty list
    pub async fn has_all_permissions(
        &self,
        user_id: Uuid,
        permissions: &[Permission],
    ) -> Result<bool> {
        let resolved = self.resolve(user_id).await?;
        Ok(permissions.iter().all(|permission| resolved.has(*permission)))
    }

    /// True when any permission is held; false for an empty list
    pub async fn has_any_permission(
        &self,
        user_id: Uuid,
        permissions: &[Permission],
    ) -> Result<bool> {
        let resolved = self.resolve(user_id).await?;
        Ok(permissions.iter().any(|permission| resolved.has(*permission)))
    }

    /// Check with the source of the grant or the reason for denial
    pub async fn check_permission_detailed(
        &self,
        user_id: Uuid,
        permission: Permission,
    ) -> Result<PermissionCheck> {
        let resolved = self.resolve(user_id).await?;
        Ok(PermissionCheck::from_resolved(&resolved, permission))
    }

    /// Admin-equivalent: an admin role or the wildcard permission
    pub async fn is_admin(&self, user_id: Uuid) -> Result<bool> {
        let user = self.load_user(user_id).await?;
        if self.config.admin_roles.contains(&user.role) {
            return Ok(true);
        }
        Ok(self.resolve_user(user).await?.has_full_access())
    }

    /// May manage share links created by others: admin-equivalent or
    /// holder of `SHARE_LINK_MANAGE`
    pub async fn can_manage_share_links(&self, user_id: Uuid) -> Result<bool> {
        let user = self.load_user(user_id).await?;
        if self.config.admin_roles.contains(&user.role) {
            return Ok(true);
        }
        Ok(self
            .resolve_user(user)
            .await?
            .has(Permission::ShareLinkManage))
    }
}
