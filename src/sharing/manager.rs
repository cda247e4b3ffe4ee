//! Share link manager
//!
//! Issues bearer links for assets and owns the link state machine:
//!
//! ```text
//! Active --revoke--> Revoked --reactivate--> Active
//! Active --clock passes expires_at--> Expired (derived, never stored)
//! Active --current_downloads == max_downloads--> Exhausted (derived)
//! ```
//!
//! Recipient-side operations live in `access`, owner-side state changes in
//! `lifecycle` and statistics in `stats`.

use super::token::TokenGenerator;
use super::types::{CreateShareLink, CreatedShareLink};
use crate::audit::{AccessContext, AuditAction, AuditEmitter, AuditEvent, SubjectType};
use crate::auth::rbac::{Permission, PermissionResolver};
use crate::config::SharingConfig;
use crate::core::models::{Asset, ShareLink};
use crate::storage::{AccessLogRepository, AssetRepository, ObjectLocator, ShareLinkRepository};
use crate::utils::auth::crypto::hash_password;
use crate::utils::error::{AccessError, Result};
use crate::utils::sys::Clock;
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub struct ShareLinkManager {
    pub(super) links: Arc<dyn ShareLinkRepository>,
    pub(super) assets: Arc<dyn AssetRepository>,
    pub(super) access_logs: Arc<dyn AccessLogRepository>,
    pub(super) locator: Arc<dyn ObjectLocator>,
    pub(super) tokens: Arc<dyn TokenGenerator>,
    pub(super) resolver: Arc<PermissionResolver>,
    pub(super) audit: Arc<AuditEmitter>,
    pub(super) clock: Arc<dyn Clock>,
    pub(super) config: SharingConfig,
}

/// Collaborators of a [`ShareLinkManager`]
pub struct ShareLinkDeps {
    pub links: Arc<dyn ShareLinkRepository>,
    pub assets: Arc<dyn AssetRepository>,
    pub access_logs: Arc<dyn AccessLogRepository>,
    pub locator: Arc<dyn ObjectLocator>,
    pub tokens: Arc<dyn TokenGenerator>,
    pub resolver: Arc<PermissionResolver>,
    pub audit: Arc<AuditEmitter>,
    pub clock: Arc<dyn Clock>,
}

impl ShareLinkManager {
    pub fn new(deps: ShareLinkDeps, config: SharingConfig) -> Self {
        Self {
            links: deps.links,
            assets: deps.assets,
            access_logs: deps.access_logs,
            locator: deps.locator,
            tokens: deps.tokens,
            resolver: deps.resolver,
            audit: deps.audit,
            clock: deps.clock,
            config,
        }
    }

    pub(super) async fn load_asset(&self, asset_id: Uuid) -> Result<Asset> {
        self.assets
            .find_asset(asset_id)
            .await?
            .ok_or_else(|| AccessError::not_found(format!("Asset {} not found", asset_id)))
    }

    pub(super) async fn load_link(&self, link_id: Uuid) -> Result<ShareLink> {
        self.links
            .find_share_link(link_id)
            .await?
            .ok_or_else(|| AccessError::not_found(format!("Share link {} not found", link_id)))
    }

    pub(super) async fn load_link_by_token(&self, token: &str) -> Result<ShareLink> {
        self.links
            .find_share_link_by_token(token)
            .await?
            .ok_or_else(|| AccessError::not_found("Share link not found"))
    }

    /// Public URL of a token
    pub fn share_url(&self, token: &str) -> String {
        format!(
            "{}/share/{}",
            self.config.public_base_url.trim_end_matches('/'),
            token
        )
    }

    /// Issue a new link for an asset. Every call mints a fresh token.
    pub async fn create(
        &self,
        asset_id: Uuid,
        creator_id: Uuid,
        request: CreateShareLink,
        ctx: &AccessContext,
    ) -> Result<CreatedShareLink> {
        if request.password.as_deref().is_some_and(str::is_empty) {
            return Err(AccessError::bad_request("Share link password must not be empty"));
        }
        if request.max_downloads == Some(0) {
            return Err(AccessError::bad_request("max_downloads must be at least 1"));
        }

        let asset = self.load_asset(asset_id).await?;
        if asset.file.is_none() {
            return Err(AccessError::invalid_state(format!(
                "Asset {} has no file to share",
                asset_id
            )));
        }

        let password_hash = request
            .password
            .as_deref()
            .map(hash_password)
            .transpose()?;
        let now = self.clock.now();

        for attempt in 1..=self.config.max_token_attempts {
            let token = self.tokens.generate();
            if self.links.share_token_exists(&token).await? {
                debug!("Share token collision on attempt {}", attempt);
                continue;
            }

            let link = ShareLink {
                id: Uuid::new_v4(),
                token,
                asset_id,
                created_by: creator_id,
                password_hash: password_hash.clone(),
                expires_at: request.expires_at,
                max_downloads: request.max_downloads,
                current_downloads: 0,
                allow_download: request.allow_download,
                is_active: true,
                view_count: 0,
                download_count: 0,
                last_accessed_at: None,
                created_at: now,
                updated_at: now,
            };

            match self.links.insert_share_link(&link).await {
                Ok(()) => {}
                // Lost a race for the token between the check and the insert
                Err(AccessError::Conflict(_)) => {
                    debug!("Share token taken concurrently on attempt {}", attempt);
                    continue;
                }
                Err(e) => return Err(e),
            }

            info!(
                "Share link {} created for asset {} by {}",
                link.id, asset_id, creator_id
            );
            self.audit
                .emit(
                    AuditEvent::new(AuditAction::ShareLinkCreated)
                        .actor(creator_id)
                        .subject(SubjectType::ShareLink, link.id)
                        .metadata(json!({
                            "asset_id": asset_id,
                            "has_password": link.has_password(),
                            "expires_at": link.expires_at,
                            "max_downloads": link.max_downloads,
                            "allow_download": link.allow_download,
                        }))
                        .context(ctx),
                )
                .await;

            let url = self.share_url(&link.token);
            return Ok(CreatedShareLink { link, url });
        }

        warn!(
            "No unique share token after {} attempts",
            self.config.max_token_attempts
        );
        Err(AccessError::conflict(format!(
            "Could not allocate a unique share token after {} attempts",
            self.config.max_token_attempts
        )))
    }

    /// Links of an asset visible to the actor: all of them for admins and
    /// `SHARE_LINK_MANAGE` holders, the actor's own otherwise
    pub async fn list_for_asset(&self, asset_id: Uuid, actor_id: Uuid) -> Result<Vec<ShareLink>> {
        let links = self.links.list_share_links_for_asset(asset_id).await?;
        if self.resolver.can_manage_share_links(actor_id).await? {
            return Ok(links);
        }
        Ok(links
            .into_iter()
            .filter(|link| link.created_by == actor_id)
            .collect())
    }

    /// Creator, admin-equivalent or `SHARE_LINK_MANAGE` holder; `Forbidden` otherwise
    pub(super) async fn authorize_owner(&self, link: &ShareLink, actor_id: Uuid) -> Result<()> {
        if link.created_by == actor_id || self.resolver.can_manage_share_links(actor_id).await? {
            return Ok(());
        }
        warn!("User {} may not manage share link {}", actor_id, link.id);
        Err(AccessError::forbidden(format!(
            "Only the link creator or a holder of {} may manage this share link",
            Permission::ShareLinkManage
        )))
    }
}
