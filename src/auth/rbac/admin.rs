//! Audited permission administration
//!
//! Mutations of per-user grants and role templates. Each one is authorized
//! against the acting user's effective permissions and leaves an audit
//! entry with the before and after sets.

use super::catalog::Permission;
use super::resolver::PermissionResolver;
use super::templates::RoleTemplateStore;
use super::types::{ResolvedPermissions, RoleTemplateInput};
use crate::audit::{AccessContext, AuditAction, AuditEmitter, AuditEvent, SubjectType};
use crate::core::models::{RoleTemplate, UserRole};
use crate::storage::UserRepository;
use crate::utils::error::{AccessError, Result};
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub struct PermissionAdmin {
    resolver: Arc<PermissionResolver>,
    templates: Arc<RoleTemplateStore>,
    users: Arc<dyn UserRepository>,
    audit: Arc<AuditEmitter>,
}

impl PermissionAdmin {
    pub fn new(
        resolver: Arc<PermissionResolver>,
        templates: Arc<RoleTemplateStore>,
        users: Arc<dyn UserRepository>,
        audit: Arc<AuditEmitter>,
    ) -> Self {
        Self {
            resolver,
            templates,
            users,
            audit,
        }
    }

    async fn authorize(&self, actor_id: Uuid, permission: Permission) -> Result<()> {
        if self.resolver.has_permission(actor_id, permission).await? {
            return Ok(());
        }
        warn!("User {} lacks {}", actor_id, permission);
        Err(AccessError::forbidden(format!(
            "Missing permission: {}",
            permission
        )))
    }

    /// Replace a user's additional grants. An empty set clears them.
    pub async fn set_additional_permissions<I>(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        permissions: I,
        ctx: &AccessContext,
    ) -> Result<ResolvedPermissions>
    where
        I: IntoIterator<Item = Permission>,
    {
        self.authorize(actor_id, Permission::UserManagePermissions)
            .await?;

        let before = self.resolver.resolve(user_id).await?.additional_permissions;
        let after: BTreeSet<Permission> = permissions.into_iter().collect();
        self.users
            .set_additional_permissions(user_id, &after)
            .await?;

        info!(
            "User {} additional permissions set by {} ({} -> {})",
            user_id,
            actor_id,
            before.len(),
            after.len()
        );
        self.audit
            .emit(
                AuditEvent::new(AuditAction::UserPermissionsUpdated)
                    .actor(actor_id)
                    .subject(SubjectType::User, user_id)
                    .metadata(json!({ "before": before, "after": after }))
                    .context(ctx),
            )
            .await;

        self.resolver.resolve(user_id).await
    }

    /// Create or replace a role template
    pub async fn save_role_template(
        &self,
        actor_id: Uuid,
        input: RoleTemplateInput,
        ctx: &AccessContext,
    ) -> Result<RoleTemplate> {
        self.authorize(actor_id, Permission::RoleTemplateManage)
            .await?;

        let before = self.templates.role_permissions(input.role).await?;
        let saved = self.templates.save(input, actor_id).await?;

        self.audit
            .emit(
                AuditEvent::new(AuditAction::RoleTemplateUpdated)
                    .actor(actor_id)
                    .subject(SubjectType::RoleTemplate, saved.role)
                    .metadata(json!({
                        "before": before.permissions,
                        "before_customized": before.template_applied,
                        "after": saved.permissions,
                    }))
                    .context(ctx),
            )
            .await;

        Ok(saved)
    }

    /// Drop a role template, restoring the defaults. Returns whether one existed.
    pub async fn reset_role_template(
        &self,
        actor_id: Uuid,
        role: UserRole,
        ctx: &AccessContext,
    ) -> Result<bool> {
        self.authorize(actor_id, Permission::RoleTemplateManage)
            .await?;

        let removed = self.templates.get(role).await?;
        if !self.templates.reset(role).await? {
            return Ok(false);
        }

        self.audit
            .emit(
                AuditEvent::new(AuditAction::RoleTemplateReset)
                    .actor(actor_id)
                    .subject(SubjectType::RoleTemplate, role)
                    .metadata(json!({
                        "removed": removed.map(|template| template.permissions),
                        "restored": self.templates.defaults(role),
                    }))
                    .context(ctx),
            )
            .await;

        Ok(true)
    }
}
