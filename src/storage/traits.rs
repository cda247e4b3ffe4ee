//! Repository traits consumed by the access core

use crate::audit::{AccessLogEntry, AuditLogEntry, AuditQuery};
use crate::auth::rbac::Permission;
use crate::core::models::{Asset, RoleTemplate, ShareLink, User, UserRole};
use crate::utils::error::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use uuid::Uuid;

/// User lookups and grant updates
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user(&self, user_id: Uuid) -> Result<Option<User>>;

    /// Replace the user's additional permissions. `NotFound` if the user is missing.
    async fn set_additional_permissions(
        &self,
        user_id: Uuid,
        permissions: &BTreeSet<Permission>,
    ) -> Result<()>;
}

/// Asset lookups
#[async_trait]
pub trait AssetRepository: Send + Sync {
    async fn find_asset(&self, asset_id: Uuid) -> Result<Option<Asset>>;
}

/// Role template persistence, keyed on role
#[async_trait]
pub trait RoleTemplateRepository: Send + Sync {
    async fn find_role_template(&self, role: UserRole) -> Result<Option<RoleTemplate>>;

    async fn list_role_templates(&self) -> Result<Vec<RoleTemplate>>;

    /// Insert or replace the template for `template.role`.
    ///
    /// An existing row keeps its `id` and `created_at`; the stored row is returned.
    async fn upsert_role_template(&self, template: &RoleTemplate) -> Result<RoleTemplate>;

    /// Hard delete. Returns whether a row was removed.
    async fn delete_role_template(&self, role: UserRole) -> Result<bool>;
}

/// Share link persistence
#[async_trait]
pub trait ShareLinkRepository: Send + Sync {
    /// `Conflict` when the token is already taken
    async fn insert_share_link(&self, link: &ShareLink) -> Result<()>;

    async fn share_token_exists(&self, token: &str) -> Result<bool>;

    async fn find_share_link(&self, link_id: Uuid) -> Result<Option<ShareLink>>;

    async fn find_share_link_by_token(&self, token: &str) -> Result<Option<ShareLink>>;

    async fn list_share_links_for_asset(&self, asset_id: Uuid) -> Result<Vec<ShareLink>>;

    /// Set `is_active`. Returns `false` when the link already had that state.
    async fn set_share_link_active(
        &self,
        link_id: Uuid,
        active: bool,
        at: DateTime<Utc>,
    ) -> Result<bool>;

    /// Bump `view_count` and `last_accessed_at`
    async fn record_share_view(&self, link_id: Uuid, at: DateTime<Utc>) -> Result<()>;

    /// Atomically count one download if the link is active, unexpired at `at`
    /// and under its quota.
    ///
    /// `current_downloads`, `download_count` and `last_accessed_at` move
    /// together in a single conditional write. Returns whether the download
    /// was counted.
    async fn try_consume_download(&self, link_id: Uuid, at: DateTime<Utc>) -> Result<bool>;
}

/// Append-only share link access log
#[async_trait]
pub trait AccessLogRepository: Send + Sync {
    async fn append_access_log(&self, entry: &AccessLogEntry) -> Result<()>;

    /// Entries of one link, oldest first
    async fn list_access_logs(&self, share_link_id: Uuid) -> Result<Vec<AccessLogEntry>>;
}

/// Append-only audit trail
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn append_audit_log(&self, entry: &AuditLogEntry) -> Result<()>;

    /// Matching entries, newest first, truncated to `query.limit`
    async fn query_audit_logs(&self, query: &AuditQuery) -> Result<Vec<AuditLogEntry>>;
}

/// Every repository the access core needs, backed by one store
pub trait AccessStore:
    UserRepository
    + AssetRepository
    + RoleTemplateRepository
    + ShareLinkRepository
    + AccessLogRepository
    + AuditLogRepository
{
}

impl<T> AccessStore for T where
    T: UserRepository
        + AssetRepository
        + RoleTemplateRepository
        + ShareLinkRepository
        + AccessLogRepository
        + AuditLogRepository
{
}
