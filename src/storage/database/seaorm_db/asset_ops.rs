use crate::core::models::Asset;
use crate::storage::AssetRepository;
use crate::utils::error::{AccessError, Result};
use async_trait::async_trait;
use sea_orm::*;
use tracing::debug;
use uuid::Uuid;

use super::super::entities::{self, asset};
use super::connection::map_insert_error;
use super::types::SeaOrmStore;

impl SeaOrmStore {
    /// Create an asset row
    pub async fn create_asset(&self, asset: &Asset) -> Result<()> {
        debug!("Creating asset: {}", asset.id);

        entities::Asset::insert(asset::Model::from_domain(asset))
            .exec_without_returning(&self.db)
            .await
            .map_err(|e| map_insert_error(e, "Asset already exists"))?;
        Ok(())
    }
}

#[async_trait]
impl AssetRepository for SeaOrmStore {
    async fn find_asset(&self, asset_id: Uuid) -> Result<Option<Asset>> {
        debug!("Finding asset by ID: {}", asset_id);

        Ok(entities::Asset::find_by_id(asset_id)
            .one(&self.db)
            .await
            .map_err(AccessError::Database)?
            .map(asset::Model::into_domain))
    }
}
