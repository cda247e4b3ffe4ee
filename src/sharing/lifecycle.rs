//! Owner-side state changes: revoke and reactivate

use super::manager::ShareLinkManager;
use crate::audit::{AccessContext, AuditAction, AuditEvent, SubjectType};
use crate::core::models::ShareLink;
use crate::utils::error::{AccessError, Result};
use serde_json::json;
use tracing::info;
use uuid::Uuid;

impl ShareLinkManager {
    /// Deactivate a link. Revoking a revoked link is a no-op.
    pub async fn revoke(
        &self,
        link_id: Uuid,
        actor_id: Uuid,
        ctx: &AccessContext,
    ) -> Result<ShareLink> {
        self.set_active(link_id, actor_id, false, ctx).await
    }

    /// Re-enable a revoked link. Expired links stay dead.
    pub async fn reactivate(
        &self,
        link_id: Uuid,
        actor_id: Uuid,
        ctx: &AccessContext,
    ) -> Result<ShareLink> {
        self.set_active(link_id, actor_id, true, ctx).await
    }

    async fn set_active(
        &self,
        link_id: Uuid,
        actor_id: Uuid,
        active: bool,
        ctx: &AccessContext,
    ) -> Result<ShareLink> {
        let link = self.load_link(link_id).await?;
        self.authorize_owner(&link, actor_id).await?;

        let now = self.clock.now();
        if active && link.is_expired(now) {
            return Err(AccessError::invalid_state(
                "Share link has expired and cannot be reactivated",
            ));
        }

        if self.links.set_share_link_active(link_id, active, now).await? {
            let action = if active {
                AuditAction::ShareLinkReactivated
            } else {
                AuditAction::ShareLinkRevoked
            };
            info!("Share link {} {} by {}", link_id, action, actor_id);
            self.audit
                .emit(
                    AuditEvent::new(action)
                        .actor(actor_id)
                        .subject(SubjectType::ShareLink, link_id)
                        .metadata(json!({ "asset_id": link.asset_id }))
                        .context(ctx),
                )
                .await;
        }

        self.load_link(link_id).await
    }
}
