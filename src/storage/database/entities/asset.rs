use crate::core::models::{Asset, AssetFile};
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Asset database model, reduced to the columns the access core reads
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "assets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub title: String,

    pub description: Option<String>,

    /// Object storage key; `None` until a file is uploaded
    pub storage_key: Option<String>,

    pub file_name: Option<String>,

    pub content_type: Option<String>,

    pub size_bytes: Option<i64>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::share_link::Entity")]
    ShareLinks,
}

impl Related<super::share_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShareLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> Asset {
        let file = match (self.storage_key, self.file_name) {
            (Some(storage_key), Some(file_name)) => Some(AssetFile {
                storage_key,
                file_name,
                content_type: self.content_type,
                size_bytes: self.size_bytes.and_then(|size| u64::try_from(size).ok()),
            }),
            _ => None,
        };

        Asset {
            id: self.id,
            title: self.title,
            description: self.description,
            file,
        }
    }

    pub fn from_domain(asset: &Asset) -> ActiveModel {
        let file = asset.file.as_ref();
        ActiveModel {
            id: Set(asset.id),
            title: Set(asset.title.clone()),
            description: Set(asset.description.clone()),
            storage_key: Set(file.map(|f| f.storage_key.clone())),
            file_name: Set(file.map(|f| f.file_name.clone())),
            content_type: Set(file.and_then(|f| f.content_type.clone())),
            size_bytes: Set(file
                .and_then(|f| f.size_bytes)
                .and_then(|size| i64::try_from(size).ok())),
            created_at: Set(chrono::Utc::now().into()),
        }
    }
}
