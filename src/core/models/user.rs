//! User and role types

use crate::auth::rbac::Permission;
use crate::utils::error::AccessError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// User account as seen by the access core
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User ID
    pub id: Uuid,
    /// Email address
    pub email: String,
    /// Display name
    pub display_name: Option<String>,
    /// User role
    pub role: UserRole,
    /// Grants on top of the role's permissions (never subtractive)
    #[serde(default)]
    pub additional_permissions: BTreeSet<Permission>,
}

impl User {
    /// Create a user with no additional grants
    pub fn new(email: impl Into<String>, role: UserRole) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: email.into(),
            display_name: None,
            role,
            additional_permissions: BTreeSet::new(),
        }
    }

    /// Attach additional grants
    pub fn with_additional_permissions<I>(mut self, permissions: I) -> Self
    where
        I: IntoIterator<Item = Permission>,
    {
        self.additional_permissions.extend(permissions);
        self
    }
}

/// User role
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Administrator
    Admin,
    /// Content moderator
    Moderator,
    /// Uploads and maintains assets
    ContentCreator,
    /// Runs projects and tasks
    ProjectManager,
    /// External client with read access
    Client,
}

impl UserRole {
    /// Every role, in declaration order
    pub const ALL: [UserRole; 5] = [
        UserRole::Admin,
        UserRole::Moderator,
        UserRole::ContentCreator,
        UserRole::ProjectManager,
        UserRole::Client,
    ];

    /// Stable identifier used in storage and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Moderator => "MODERATOR",
            UserRole::ContentCreator => "CONTENT_CREATOR",
            UserRole::ProjectManager => "PROJECT_MANAGER",
            UserRole::Client => "CLIENT",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UserRole::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| AccessError::bad_request(format!("Invalid user role: {}", s)))
    }
}
