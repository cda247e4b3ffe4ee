use crate::audit::{AccessLogEntry, AuditLogEntry, AuditQuery};
use crate::storage::{AccessLogRepository, AuditLogRepository};
use crate::utils::error::{AccessError, Result};
use async_trait::async_trait;
use sea_orm::*;
use uuid::Uuid;

use super::super::entities::{self, audit_log, share_access_log};
use super::types::SeaOrmStore;

#[async_trait]
impl AccessLogRepository for SeaOrmStore {
    async fn append_access_log(&self, entry: &AccessLogEntry) -> Result<()> {
        entities::ShareAccessLog::insert(share_access_log::Model::from_domain(entry))
            .exec_without_returning(&self.db)
            .await
            .map_err(AccessError::Database)?;
        Ok(())
    }

    async fn list_access_logs(&self, share_link_id: Uuid) -> Result<Vec<AccessLogEntry>> {
        entities::ShareAccessLog::find()
            .filter(share_access_log::Column::ShareLinkId.eq(share_link_id))
            .order_by_asc(share_access_log::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(AccessError::Database)?
            .into_iter()
            .map(share_access_log::Model::into_domain)
            .collect()
    }
}

#[async_trait]
impl AuditLogRepository for SeaOrmStore {
    async fn append_audit_log(&self, entry: &AuditLogEntry) -> Result<()> {
        entities::AuditLog::insert(audit_log::Model::from_domain(entry))
            .exec_without_returning(&self.db)
            .await
            .map_err(AccessError::Database)?;
        Ok(())
    }

    async fn query_audit_logs(&self, query: &AuditQuery) -> Result<Vec<AuditLogEntry>> {
        let mut select = entities::AuditLog::find();

        if let Some(actor) = query.actor_user_id {
            select = select.filter(audit_log::Column::ActorUserId.eq(actor));
        }
        if let Some(action) = query.action {
            select = select.filter(audit_log::Column::Action.eq(action.as_str()));
        }
        if let Some(subject_type) = query.subject_entity_type {
            select = select.filter(audit_log::Column::SubjectEntityType.eq(subject_type.as_str()));
        }
        if let Some(subject_id) = &query.subject_entity_id {
            select = select.filter(audit_log::Column::SubjectEntityId.eq(subject_id.as_str()));
        }

        select = select.order_by_desc(audit_log::Column::CreatedAt);
        if let Some(limit) = query.limit {
            select = select.limit(limit);
        }

        Ok(select
            .all(&self.db)
            .await
            .map_err(AccessError::Database)?
            .into_iter()
            .map(audit_log::Model::into_domain)
            .collect())
    }
}
