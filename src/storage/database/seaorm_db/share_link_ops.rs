use crate::core::models::ShareLink;
use crate::storage::ShareLinkRepository;
use crate::utils::error::{AccessError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, share_link};
use super::connection::{db_time, map_insert_error};
use super::types::SeaOrmStore;

#[async_trait]
impl ShareLinkRepository for SeaOrmStore {
    async fn insert_share_link(&self, link: &ShareLink) -> Result<()> {
        debug!("Creating share link {} for asset {}", link.id, link.asset_id);

        entities::ShareLink::insert(share_link::Model::from_domain(link))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| map_insert_error(e, "Share token already exists"))?;
        Ok(())
    }

    async fn share_token_exists(&self, token: &str) -> Result<bool> {
        let count = entities::ShareLink::find()
            .filter(share_link::Column::Token.eq(token))
            .count(&self.db)
            .await
            .map_err(AccessError::Database)?;
        Ok(count > 0)
    }

    async fn find_share_link(&self, link_id: Uuid) -> Result<Option<ShareLink>> {
        Ok(entities::ShareLink::find_by_id(link_id)
            .one(&self.db)
            .await
            .map_err(AccessError::Database)?
            .map(share_link::Model::into_domain))
    }

    async fn find_share_link_by_token(&self, token: &str) -> Result<Option<ShareLink>> {
        Ok(entities::ShareLink::find()
            .filter(share_link::Column::Token.eq(token))
            .one(&self.db)
            .await
            .map_err(AccessError::Database)?
            .map(share_link::Model::into_domain))
    }

    async fn list_share_links_for_asset(&self, asset_id: Uuid) -> Result<Vec<ShareLink>> {
        Ok(entities::ShareLink::find()
            .filter(share_link::Column::AssetId.eq(asset_id))
            .order_by_desc(share_link::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AccessError::Database)?
            .into_iter()
            .map(share_link::Model::into_domain)
            .collect())
    }

    async fn set_share_link_active(
        &self,
        link_id: Uuid,
        active: bool,
        at: DateTime<Utc>,
    ) -> Result<bool> {
        debug!("Setting share link {} active={}", link_id, active);

        let result = entities::ShareLink::update_many()
            .col_expr(share_link::Column::IsActive, Expr::value(active))
            .col_expr(share_link::Column::UpdatedAt, Expr::value(db_time(at)))
            .filter(share_link::Column::Id.eq(link_id))
            .filter(share_link::Column::IsActive.eq(!active))
            .exec(&self.db)
            .await
            .map_err(AccessError::Database)?;

        if result.rows_affected > 0 {
            return Ok(true);
        }
        match self.find_share_link(link_id).await? {
            Some(_) => Ok(false),
            None => Err(AccessError::not_found(format!(
                "Share link {} not found",
                link_id
            ))),
        }
    }

    async fn record_share_view(&self, link_id: Uuid, at: DateTime<Utc>) -> Result<()> {
        entities::ShareLink::update_many()
            .col_expr(
                share_link::Column::ViewCount,
                Expr::col(share_link::Column::ViewCount).add(1),
            )
            .col_expr(share_link::Column::LastAccessedAt, Expr::value(db_time(at)))
            .filter(share_link::Column::Id.eq(link_id))
            .exec(&self.db)
            .await
            .map_err(AccessError::Database)?;
        Ok(())
    }

    async fn try_consume_download(&self, link_id: Uuid, at: DateTime<Utc>) -> Result<bool> {
        let now = db_time(at);

        // UPDATE share_links SET current_downloads = current_downloads + 1, ...
        // WHERE id = ? AND is_active
        //   AND (max_downloads IS NULL OR current_downloads < max_downloads)
        //   AND (expires_at IS NULL OR expires_at > ?)
        let result = entities::ShareLink::update_many()
            .col_expr(
                share_link::Column::CurrentDownloads,
                Expr::col(share_link::Column::CurrentDownloads).add(1),
            )
            .col_expr(
                share_link::Column::DownloadCount,
                Expr::col(share_link::Column::DownloadCount).add(1),
            )
            .col_expr(share_link::Column::LastAccessedAt, Expr::value(now))
            .col_expr(share_link::Column::UpdatedAt, Expr::value(now))
            .filter(share_link::Column::Id.eq(link_id))
            .filter(share_link::Column::IsActive.eq(true))
            .filter(
                Condition::any()
                    .add(share_link::Column::MaxDownloads.is_null())
                    .add(
                        Expr::col(share_link::Column::CurrentDownloads)
                            .lt(Expr::col(share_link::Column::MaxDownloads)),
                    ),
            )
            .filter(
                Condition::any()
                    .add(share_link::Column::ExpiresAt.is_null())
                    .add(share_link::Column::ExpiresAt.gt(now)),
            )
            .exec(&self.db)
            .await
            .map_err(AccessError::Database)?;

        debug!(
            "Download on share link {} counted: {}",
            link_id,
            result.rows_affected == 1
        );
        Ok(result.rows_affected == 1)
    }
}
