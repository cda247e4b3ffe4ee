//! Audit and access-log record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::error::AccessError;

/// Kind of share link access
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccessType {
    View,
    Download,
}

impl AccessType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::View => "VIEW",
            AccessType::Download => "DOWNLOAD",
        }
    }
}

impl std::str::FromStr for AccessType {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "VIEW" => Ok(AccessType::View),
            "DOWNLOAD" => Ok(AccessType::Download),
            other => Err(AccessError::internal(format!("Unknown access type: {}", other))),
        }
    }
}

/// Request metadata carried into access-log and audit entries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessContext {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub country: Option<String>,
}

impl AccessContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ip(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }
}

/// One view or download of a share link. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLogEntry {
    pub id: Uuid,
    pub share_link_id: Uuid,
    pub access_type: AccessType,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
    pub country: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AccessLogEntry {
    pub fn new(
        share_link_id: Uuid,
        access_type: AccessType,
        context: &AccessContext,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            share_link_id,
            access_type,
            ip_address: context.ip_address.clone(),
            user_agent: context.user_agent.clone(),
            referrer: context.referrer.clone(),
            country: context.country.clone(),
            created_at,
        }
    }
}

/// Audit action types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    // Permissions
    UserPermissionsUpdated,
    RoleTemplateUpdated,
    RoleTemplateReset,

    // Share links
    ShareLinkCreated,
    ShareLinkRevoked,
    ShareLinkReactivated,
    ShareLinkDownloaded,
    ShareLinkPasswordFailed,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::UserPermissionsUpdated => "USER_PERMISSIONS_UPDATED",
            AuditAction::RoleTemplateUpdated => "ROLE_TEMPLATE_UPDATED",
            AuditAction::RoleTemplateReset => "ROLE_TEMPLATE_RESET",
            AuditAction::ShareLinkCreated => "SHARE_LINK_CREATED",
            AuditAction::ShareLinkRevoked => "SHARE_LINK_REVOKED",
            AuditAction::ShareLinkReactivated => "SHARE_LINK_REACTIVATED",
            AuditAction::ShareLinkDownloaded => "SHARE_LINK_DOWNLOADED",
            AuditAction::ShareLinkPasswordFailed => "SHARE_LINK_PASSWORD_FAILED",
        }
    }
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entity types that appear as audit subjects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectType {
    User,
    RoleTemplate,
    ShareLink,
}

impl SubjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectType::User => "user",
            SubjectType::RoleTemplate => "role_template",
            SubjectType::ShareLink => "share_link",
        }
    }
}

/// Persisted audit entry. Never updated or deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditLogEntry {
    pub id: Uuid,
    /// `None` for anonymous share-link recipients
    pub actor_user_id: Option<Uuid>,
    pub action: String,
    pub subject_entity_type: Option<String>,
    pub subject_entity_id: Option<String>,
    pub metadata: serde_json::Value,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Audit event builder
#[derive(Debug, Clone)]
pub struct AuditEvent {
    pub(crate) action: AuditAction,
    pub(crate) actor_user_id: Option<Uuid>,
    pub(crate) subject: Option<(SubjectType, String)>,
    pub(crate) metadata: serde_json::Value,
    pub(crate) ip_address: Option<String>,
    pub(crate) user_agent: Option<String>,
}

impl AuditEvent {
    pub fn new(action: AuditAction) -> Self {
        Self {
            action,
            actor_user_id: None,
            subject: None,
            metadata: serde_json::Value::Object(Default::default()),
            ip_address: None,
            user_agent: None,
        }
    }

    pub fn actor(mut self, user_id: Uuid) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    pub fn subject(mut self, subject_type: SubjectType, id: impl ToString) -> Self {
        self.subject = Some((subject_type, id.to_string()));
        self
    }

    pub fn metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn context(mut self, context: &AccessContext) -> Self {
        self.ip_address = context.ip_address.clone();
        self.user_agent = context.user_agent.clone();
        self
    }

    pub fn action(&self) -> AuditAction {
        self.action
    }

    pub(crate) fn into_entry(self, created_at: DateTime<Utc>) -> AuditLogEntry {
        let (subject_entity_type, subject_entity_id) = match self.subject {
            Some((subject_type, id)) => (Some(subject_type.as_str().to_string()), Some(id)),
            None => (None, None),
        };

        AuditLogEntry {
            id: Uuid::new_v4(),
            actor_user_id: self.actor_user_id,
            action: self.action.as_str().to_string(),
            subject_entity_type,
            subject_entity_id,
            metadata: self.metadata,
            ip_address: self.ip_address,
            user_agent: self.user_agent,
            created_at,
        }
    }
}

/// Filter for reading the audit trail, newest first
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    pub actor_user_id: Option<Uuid>,
    pub action: Option<AuditAction>,
    pub subject_entity_type: Option<SubjectType>,
    pub subject_entity_id: Option<String>,
    pub limit: Option<u64>,
}

impl AuditQuery {
    pub fn for_subject(subject_type: SubjectType, id: impl ToString) -> Self {
        Self {
            subject_entity_type: Some(subject_type),
            subject_entity_id: Some(id.to_string()),
            ..Self::default()
        }
    }

    pub fn with_action(mut self, action: AuditAction) -> Self {
        self.action = Some(action);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// In-memory predicate equivalent of the SQL filter
    pub fn matches(&self, entry: &AuditLogEntry) -> bool {
        self.actor_user_id
            .is_none_or(|actor| entry.actor_user_id == Some(actor))
            && self
                .action
                .is_none_or(|action| entry.action == action.as_str())
            && self.subject_entity_type.is_none_or(|subject_type| {
                entry.subject_entity_type.as_deref() == Some(subject_type.as_str())
            })
            && self
                .subject_entity_id
                .as_deref()
                .is_none_or(|id| entry.subject_entity_id.as_deref() == Some(id))
    }
}
