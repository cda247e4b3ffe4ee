use crate::audit::{AccessLogEntry, AccessType};
use crate::utils::error::Result as CoreResult;
use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Share link access log database model (append-only)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "share_access_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub share_link_id: Uuid,

    /// `VIEW` or `DOWNLOAD`
    pub access_type: String,

    pub ip_address: Option<String>,

    pub user_agent: Option<String>,

    pub referrer: Option<String>,

    pub country: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::share_link::Entity",
        from = "Column::ShareLinkId",
        to = "super::share_link::Column::Id"
    )]
    ShareLink,
}

impl Related<super::share_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShareLink.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> CoreResult<AccessLogEntry> {
        Ok(AccessLogEntry {
            id: self.id,
            share_link_id: self.share_link_id,
            access_type: self.access_type.parse::<AccessType>()?,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            referrer: self.referrer,
            country: self.country,
            created_at: self.created_at.with_timezone(&Utc),
        })
    }

    pub fn from_domain(entry: &AccessLogEntry) -> ActiveModel {
        ActiveModel {
            id: Set(entry.id),
            share_link_id: Set(entry.share_link_id),
            access_type: Set(entry.access_type.as_str().to_string()),
            ip_address: Set(entry.ip_address.clone()),
            user_agent: Set(entry.user_agent.clone()),
            referrer: Set(entry.referrer.clone()),
            country: Set(entry.country.clone()),
            created_at: Set(entry.created_at.into()),
        }
    }
}
