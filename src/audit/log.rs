//! Read side of the audit trail and the share link access log

use super::types::{AccessLogEntry, AuditLogEntry, AuditQuery, SubjectType};
use crate::auth::rbac::{Permission, PermissionResolver};
use crate::storage::{AccessLogRepository, AuditLogRepository};
use crate::utils::error::{AccessError, Result};
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

/// Query service over the append-only logs
pub struct AuditLog {
    audit_logs: Arc<dyn AuditLogRepository>,
    access_logs: Arc<dyn AccessLogRepository>,
    resolver: Arc<PermissionResolver>,
}

impl AuditLog {
    pub fn new(
        audit_logs: Arc<dyn AuditLogRepository>,
        access_logs: Arc<dyn AccessLogRepository>,
        resolver: Arc<PermissionResolver>,
    ) -> Self {
        Self {
            audit_logs,
            access_logs,
            resolver,
        }
    }

    /// Matching audit entries, newest first. No authorization check.
    pub async fn entries(&self, query: &AuditQuery) -> Result<Vec<AuditLogEntry>> {
        self.audit_logs.query_audit_logs(query).await
    }

    /// Audit entries on behalf of `actor_id`, who must hold `AUDIT_LOG_READ`
    pub async fn entries_for(
        &self,
        actor_id: Uuid,
        query: &AuditQuery,
    ) -> Result<Vec<AuditLogEntry>> {
        if !self
            .resolver
            .has_permission(actor_id, Permission::AuditLogRead)
            .await?
        {
            warn!("User {} denied audit log read", actor_id);
            return Err(AccessError::forbidden(format!(
                "Missing permission: {}",
                Permission::AuditLogRead
            )));
        }
        self.entries(query).await
    }

    /// Full history of one entity
    pub async fn for_subject(
        &self,
        subject_type: SubjectType,
        subject_id: impl ToString,
    ) -> Result<Vec<AuditLogEntry>> {
        self.entries(&AuditQuery::for_subject(subject_type, subject_id))
            .await
    }

    /// Access-log entries of one share link, oldest first
    pub async fn access_entries(&self, share_link_id: Uuid) -> Result<Vec<AccessLogEntry>> {
        self.access_logs.list_access_logs(share_link_id).await
    }
}
