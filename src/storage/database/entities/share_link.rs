use crate::core::models::ShareLink;
use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Share link database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "share_links")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub token: String,

    pub asset_id: Uuid,

    pub created_by: Uuid,

    #[serde(skip_serializing)]
    pub password_hash: Option<String>,

    pub expires_at: Option<DateTimeWithTimeZone>,

    pub max_downloads: Option<i32>,

    /// Counted against `max_downloads`; only moved by the conditional update
    pub current_downloads: i32,

    pub allow_download: bool,

    pub is_active: bool,

    pub view_count: i64,

    pub download_count: i64,

    pub last_accessed_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::asset::Entity",
        from = "Column::AssetId",
        to = "super::asset::Column::Id"
    )]
    Asset,
    #[sea_orm(has_many = "super::share_access_log::Entity")]
    AccessLogs,
}

impl Related<super::asset::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Asset.def()
    }
}

impl Related<super::share_access_log::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AccessLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> ShareLink {
        ShareLink {
            id: self.id,
            token: self.token,
            asset_id: self.asset_id,
            created_by: self.created_by,
            password_hash: self.password_hash,
            expires_at: self.expires_at.map(|at| at.with_timezone(&Utc)),
            max_downloads: self.max_downloads.map(|max| max.max(0) as u32),
            current_downloads: self.current_downloads.max(0) as u32,
            allow_download: self.allow_download,
            is_active: self.is_active,
            view_count: self.view_count.max(0) as u64,
            download_count: self.download_count.max(0) as u64,
            last_accessed_at: self.last_accessed_at.map(|at| at.with_timezone(&Utc)),
            created_at: self.created_at.with_timezone(&Utc),
            updated_at: self.updated_at.with_timezone(&Utc),
        }
    }

    pub fn from_domain(link: &ShareLink) -> ActiveModel {
        ActiveModel {
            id: Set(link.id),
            token: Set(link.token.clone()),
            asset_id: Set(link.asset_id),
            created_by: Set(link.created_by),
            password_hash: Set(link.password_hash.clone()),
            expires_at: Set(link.expires_at.map(Into::into)),
            max_downloads: Set(link
                .max_downloads
                .map(|max| i32::try_from(max).unwrap_or(i32::MAX))),
            current_downloads: Set(i32::try_from(link.current_downloads).unwrap_or(i32::MAX)),
            allow_download: Set(link.allow_download),
            is_active: Set(link.is_active),
            view_count: Set(i64::try_from(link.view_count).unwrap_or(i64::MAX)),
            download_count: Set(i64::try_from(link.download_count).unwrap_or(i64::MAX)),
            last_accessed_at: Set(link.last_accessed_at.map(Into::into)),
            created_at: Set(link.created_at.into()),
            updated_at: Set(link.updated_at.into()),
        }
    }
}
