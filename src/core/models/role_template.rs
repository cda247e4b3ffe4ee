//! Persisted role permission overrides

use super::UserRole;
use crate::auth::rbac::Permission;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// Admin-edited replacement for a role's default permission set
///
/// At most one template exists per role. Deleting it restores the
/// compiled-in defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleTemplate {
    /// Template ID
    pub id: Uuid,
    /// Role this template overrides
    pub role: UserRole,
    /// Full permission set granted to the role
    pub permissions: BTreeSet<Permission>,
    /// Free-form description
    pub description: Option<String>,
    /// Presentation grouping
    pub category: Option<String>,
    /// Admin who last saved the template
    pub updated_by: Option<Uuid>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}
