use crate::audit::AuditLogEntry;
use chrono::Utc;
use sea_orm::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Audit log database model (append-only)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "audit_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// `None` for anonymous share link recipients
    pub actor_user_id: Option<Uuid>,

    pub action: String,

    pub subject_entity_type: Option<String>,

    pub subject_entity_id: Option<String>,

    pub metadata: Json,

    pub ip_address: Option<String>,

    pub user_agent: Option<String>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_domain(self) -> AuditLogEntry {
        AuditLogEntry {
            id: self.id,
            actor_user_id: self.actor_user_id,
            action: self.action,
            subject_entity_type: self.subject_entity_type,
            subject_entity_id: self.subject_entity_id,
            metadata: self.metadata,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            created_at: self.created_at.with_timezone(&Utc),
        }
    }

    pub fn from_domain(entry: &AuditLogEntry) -> ActiveModel {
        ActiveModel {
            id: Set(entry.id),
            actor_user_id: Set(entry.actor_user_id),
            action: Set(entry.action.clone()),
            subject_entity_type: Set(entry.subject_entity_type.clone()),
            subject_entity_id: Set(entry.subject_entity_id.clone()),
            metadata: Set(entry.metadata.clone()),
            ip_address: Set(entry.ip_address.clone()),
            user_agent: Set(entry.user_agent.clone()),
            created_at: Set(entry.created_at.into()),
        }
    }
}
