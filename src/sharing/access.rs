//! Recipient-side share link operations

use super::manager::ShareLinkManager;
use super::types::{SharedAsset, SharedAssetInfo, ShareLinkSummary};
use crate::audit::{
    AccessContext, AccessLogEntry, AccessType, AuditAction, AuditEvent, SubjectType,
};
use crate::core::models::{Asset, AssetFile, ShareDenial, ShareLink};
use crate::storage::{LocatorPurpose, ResourceLocator};
use crate::utils::auth::crypto::verify_password;
use crate::utils::error::{AccessError, Result};
use serde_json::json;
use tracing::{debug, info, warn};

impl ShareLinkManager {
    /// Argon2 check of a supplied password. Failures are audited.
    async fn check_password(
        &self,
        link: &ShareLink,
        supplied: Option<&str>,
        ctx: &AccessContext,
    ) -> Result<()> {
        let Some(hash) = link.password_hash.as_deref() else {
            return Ok(());
        };
        let Some(password) = supplied else {
            return Err(AccessError::unauthorized("Password required"));
        };

        if verify_password(password, hash)? {
            return Ok(());
        }

        warn!("Wrong password for share link {}", link.id);
        self.audit
            .emit(
                AuditEvent::new(AuditAction::ShareLinkPasswordFailed)
                    .subject(SubjectType::ShareLink, link.id)
                    .metadata(json!({ "asset_id": link.asset_id }))
                    .context(ctx),
            )
            .await;
        Err(AccessError::unauthorized("Invalid password"))
    }

    fn shared_file(asset: &Asset) -> Result<&AssetFile> {
        asset.file.as_ref().ok_or_else(|| {
            AccessError::invalid_state(format!("Asset {} has no file", asset.id))
        })
    }

    /// Open a link as a recipient
    ///
    /// A password-protected link opened without a password yields metadata
    /// only, with `requires_password` set. Locators and the VIEW record are
    /// produced only once access is granted.
    pub async fn resolve_for_access(
        &self,
        token: &str,
        password: Option<&str>,
        ctx: &AccessContext,
    ) -> Result<SharedAsset> {
        let link = self.load_link_by_token(token).await?;
        let now = self.clock.now();
        if let Some(denial) = link.access_denial(now) {
            debug!("Share link {} refused: {}", link.id, denial);
            return Err(denial.into());
        }

        let asset = self.load_asset(link.asset_id).await?;
        let info = SharedAssetInfo::from(&asset);

        if link.has_password() && password.is_none() {
            return Ok(SharedAsset {
                asset: info,
                link: ShareLinkSummary::from(&link),
                requires_password: true,
                preview: None,
                download: None,
            });
        }
        self.check_password(&link, password, ctx).await?;

        let file = Self::shared_file(&asset)?;
        let preview = self.locator.locate(file, LocatorPurpose::Preview).await?;
        let download = if link.can_download(now) {
            Some(self.locator.locate(file, LocatorPurpose::Download).await?)
        } else {
            None
        };

        self.links.record_share_view(link.id, now).await?;
        self.audit
            .record_access(AccessLogEntry::new(link.id, AccessType::View, ctx, now))
            .await;

        Ok(SharedAsset {
            asset: info,
            link: ShareLinkSummary::from(&link),
            requires_password: link.has_password(),
            preview: Some(preview),
            download,
        })
    }

    /// Check a link password without issuing anything
    pub async fn verify_password(
        &self,
        token: &str,
        password: &str,
        ctx: &AccessContext,
    ) -> Result<()> {
        let link = self.load_link_by_token(token).await?;
        if let Some(denial) = link.access_denial(self.clock.now()) {
            return Err(denial.into());
        }
        if !link.has_password() {
            return Err(AccessError::bad_request("Share link has no password"));
        }
        self.check_password(&link, Some(password), ctx).await
    }

    /// Count one download and mint its locator
    ///
    /// The quota is enforced by a single conditional store update, so
    /// concurrent callers never exceed `max_downloads`.
    pub async fn get_download_locator(
        &self,
        token: &str,
        password: Option<&str>,
        ctx: &AccessContext,
    ) -> Result<ResourceLocator> {
        let link = self.load_link_by_token(token).await?;
        let now = self.clock.now();
        if let Some(denial) = link.download_denial(now) {
            debug!("Download via share link {} refused: {}", link.id, denial);
            return Err(denial.into());
        }
        self.check_password(&link, password, ctx).await?;

        let asset = self.load_asset(link.asset_id).await?;
        let locator = self
            .locator
            .locate(Self::shared_file(&asset)?, LocatorPurpose::Download)
            .await?;

        if !self.links.try_consume_download(link.id, now).await? {
            let denial = self
                .links
                .find_share_link(link.id)
                .await?
                .and_then(|fresh| fresh.download_denial(now))
                .unwrap_or(ShareDenial::LimitReached);
            debug!("Download via share link {} lost the race: {}", link.id, denial);
            return Err(denial.into());
        }

        info!("Download issued via share link {}", link.id);
        self.audit
            .record_access(AccessLogEntry::new(link.id, AccessType::Download, ctx, now))
            .await;
        self.audit
            .emit(
                AuditEvent::new(AuditAction::ShareLinkDownloaded)
                    .subject(SubjectType::ShareLink, link.id)
                    .metadata(json!({
                        "asset_id": asset.id,
                        "file_name": locator.file_name,
                    }))
                    .context(ctx),
            )
            .await;

        Ok(locator)
    }
}
