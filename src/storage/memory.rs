//! In-memory store
//!
//! Backs every repository trait with `parking_lot` locks. Used by tests and
//! by embedders that keep state elsewhere.

use super::traits::{
    AccessLogRepository, AssetRepository, AuditLogRepository, RoleTemplateRepository,
    ShareLinkRepository, UserRepository,
};
use crate::audit::{AccessLogEntry, AuditLogEntry, AuditQuery};
use crate::auth::rbac::Permission;
use crate::core::models::{Asset, RoleTemplate, ShareLink, User, UserRole};
use crate::utils::error::{AccessError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{BTreeSet, HashMap};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
struct ShareLinkTable {
    by_id: HashMap<Uuid, ShareLink>,
    by_token: HashMap<String, Uuid>,
}

/// Store holding all state in process memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<Uuid, User>>,
    assets: RwLock<HashMap<Uuid, Asset>>,
    role_templates: RwLock<HashMap<UserRole, RoleTemplate>>,
    share_links: RwLock<ShareLinkTable>,
    access_logs: RwLock<Vec<AccessLogEntry>>,
    audit_logs: RwLock<Vec<AuditLogEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user
    pub fn insert_user(&self, user: User) {
        self.users.write().insert(user.id, user);
    }

    /// Insert or replace an asset
    pub fn insert_asset(&self, asset: Asset) {
        self.assets.write().insert(asset.id, asset);
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().get(&user_id).cloned())
    }

    async fn set_additional_permissions(
        &self,
        user_id: Uuid,
        permissions: &BTreeSet<Permission>,
    ) -> Result<()> {
        let mut users = self.users.write();
        let user = users
            .get_mut(&user_id)
            .ok_or_else(|| AccessError::not_found(format!("User {} not found", user_id)))?;
        user.additional_permissions = permissions.clone();
        Ok(())
    }
}

#[async_trait]
impl AssetRepository for MemoryStore {
    async fn find_asset(&self, asset_id: Uuid) -> Result<Option<Asset>> {
        Ok(self.assets.read().get(&asset_id).cloned())
    }
}

#[async_trait]
impl RoleTemplateRepository for MemoryStore {
    async fn find_role_template(&self, role: UserRole) -> Result<Option<RoleTemplate>> {
        Ok(self.role_templates.read().get(&role).cloned())
    }

    async fn list_role_templates(&self) -> Result<Vec<RoleTemplate>> {
        let mut templates: Vec<_> = self.role_templates.read().values().cloned().collect();
        templates.sort_by_key(|template| template.role);
        Ok(templates)
    }

    async fn upsert_role_template(&self, template: &RoleTemplate) -> Result<RoleTemplate> {
        let mut templates = self.role_templates.write();
        let stored = match templates.get(&template.role) {
            Some(existing) => RoleTemplate {
                id: existing.id,
                created_at: existing.created_at,
                ..template.clone()
            },
            None => template.clone(),
        };
        templates.insert(stored.role, stored.clone());
        Ok(stored)
    }

    async fn delete_role_template(&self, role: UserRole) -> Result<bool> {
        Ok(self.role_templates.write().remove(&role).is_some())
    }
}

#[async_trait]
impl ShareLinkRepository for MemoryStore {
    async fn insert_share_link(&self, link: &ShareLink) -> Result<()> {
        let mut table = self.share_links.write();
        if table.by_token.contains_key(&link.token) {
            return Err(AccessError::conflict("Share token already exists"));
        }
        table.by_token.insert(link.token.clone(), link.id);
        table.by_id.insert(link.id, link.clone());
        Ok(())
    }

    async fn share_token_exists(&self, token: &str) -> Result<bool> {
        Ok(self.share_links.read().by_token.contains_key(token))
    }

    async fn find_share_link(&self, link_id: Uuid) -> Result<Option<ShareLink>> {
        Ok(self.share_links.read().by_id.get(&link_id).cloned())
    }

    async fn find_share_link_by_token(&self, token: &str) -> Result<Option<ShareLink>> {
        let table = self.share_links.read();
        Ok(table
            .by_token
            .get(token)
            .and_then(|id| table.by_id.get(id))
            .cloned())
    }

    async fn list_share_links_for_asset(&self, asset_id: Uuid) -> Result<Vec<ShareLink>> {
        let mut links: Vec<_> = self
            .share_links
            .read()
            .by_id
            .values()
            .filter(|link| link.asset_id == asset_id)
            .cloned()
            .collect();
        links.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(links)
    }

    async fn set_share_link_active(
        &self,
        link_id: Uuid,
        active: bool,
        at: DateTime<Utc>,
    ) -> Result<bool> {
        let mut table = self.share_links.write();
        let link = table
            .by_id
            .get_mut(&link_id)
            .ok_or_else(|| AccessError::not_found(format!("Share link {} not found", link_id)))?;
        if link.is_active == active {
            return Ok(false);
        }
        link.is_active = active;
        link.updated_at = at;
        Ok(true)
    }

    async fn record_share_view(&self, link_id: Uuid, at: DateTime<Utc>) -> Result<()> {
        let mut table = self.share_links.write();
        if let Some(link) = table.by_id.get_mut(&link_id) {
            link.view_count += 1;
            link.last_accessed_at = Some(at);
        }
        Ok(())
    }

    async fn try_consume_download(&self, link_id: Uuid, at: DateTime<Utc>) -> Result<bool> {
        // Check and both increments happen under one write guard.
        let mut table = self.share_links.write();
        let Some(link) = table.by_id.get_mut(&link_id) else {
            return Ok(false);
        };
        if link.access_denial(at).is_some() {
            debug!("Download refused for share link {}", link_id);
            return Ok(false);
        }
        link.current_downloads += 1;
        link.download_count += 1;
        link.last_accessed_at = Some(at);
        link.updated_at = at;
        Ok(true)
    }
}

#[async_trait]
impl AccessLogRepository for MemoryStore {
    async fn append_access_log(&self, entry: &AccessLogEntry) -> Result<()> {
        self.access_logs.write().push(entry.clone());
        Ok(())
    }

    async fn list_access_logs(&self, share_link_id: Uuid) -> Result<Vec<AccessLogEntry>> {
        Ok(self
            .access_logs
            .read()
            .iter()
            .filter(|entry| entry.share_link_id == share_link_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AuditLogRepository for MemoryStore {
    async fn append_audit_log(&self, entry: &AuditLogEntry) -> Result<()> {
        self.audit_logs.write().push(entry.clone());
        Ok(())
    }

    async fn query_audit_logs(&self, query: &AuditQuery) -> Result<Vec<AuditLogEntry>> {
        let entries = self.audit_logs.read();
        let limit = query.limit.map_or(usize::MAX, |limit| limit as usize);
        Ok(entries
            .iter()
            .rev()
            .filter(|entry| query.matches(entry))
            .take(limit)
            .cloned()
            .collect())
    }
}
