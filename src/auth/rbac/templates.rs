//! Role template store
//!
//! Admin-editable overrides of role defaults. A stored template fully
//! replaces the defaults of its role; deleting it restores them.

use super::catalog::{Permission, default_role_permissions};
use super::types::{RolePermissions, RoleTemplateInput, RoleTemplateView};
use crate::core::models::{RoleTemplate, UserRole};
use crate::storage::RoleTemplateRepository;
use crate::utils::error::Result;
use crate::utils::sys::Clock;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

pub struct RoleTemplateStore {
    repository: Arc<dyn RoleTemplateRepository>,
    clock: Arc<dyn Clock>,
}

impl RoleTemplateStore {
    pub fn new(repository: Arc<dyn RoleTemplateRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn get(&self, role: UserRole) -> Result<Option<RoleTemplate>> {
        self.repository.find_role_template(role).await
    }

    /// Template permissions when present, role defaults otherwise
    pub async fn role_permissions(&self, role: UserRole) -> Result<RolePermissions> {
        let template = self.get(role).await?;
        debug!(
            "Role {} permissions from {}",
            role,
            if template.is_some() { "template" } else { "defaults" }
        );

        Ok(template.map_or_else(
            || RolePermissions {
                permissions: default_role_permissions(role),
                template_applied: false,
            },
            |template| RolePermissions {
                permissions: template.permissions,
                template_applied: true,
            },
        ))
    }

    /// Every role with its current permissions
    pub async fn list(&self) -> Result<Vec<RoleTemplateView>> {
        let mut stored = self.repository.list_role_templates().await?;

        Ok(UserRole::ALL
            .into_iter()
            .map(|role| {
                match stored
                    .iter()
                    .position(|template| template.role == role)
                    .map(|index| stored.swap_remove(index))
                {
                    Some(template) => RoleTemplateView {
                        role,
                        permissions: template.permissions,
                        customized: true,
                        description: template.description,
                        category: template.category,
                        updated_by: template.updated_by,
                        updated_at: Some(template.updated_at),
                    },
                    None => RoleTemplateView {
                        role,
                        permissions: default_role_permissions(role),
                        customized: false,
                        description: None,
                        category: None,
                        updated_by: None,
                        updated_at: None,
                    },
                }
            })
            .collect())
    }

    /// Create or replace the template of `input.role`
    pub async fn save(&self, input: RoleTemplateInput, updated_by: Uuid) -> Result<RoleTemplate> {
        let now = self.clock.now();
        let template = RoleTemplate {
            id: Uuid::new_v4(),
            role: input.role,
            permissions: input.permissions,
            description: input.description,
            category: input.category,
            updated_by: Some(updated_by),
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.upsert_role_template(&template).await?;
        info!(
            "Role template for {} saved with {} permissions",
            stored.role,
            stored.permissions.len()
        );
        Ok(stored)
    }

    /// Delete the template of `role`. Returns whether one existed.
    pub async fn reset(&self, role: UserRole) -> Result<bool> {
        let removed = self.repository.delete_role_template(role).await?;
        if removed {
            info!("Role template for {} reset to defaults", role);
        }
        Ok(removed)
    }

    /// Default permissions of a role, ignoring any template
    pub fn defaults(&self, role: UserRole) -> BTreeSet<Permission> {
        default_role_permissions(role)
    }
}
