//! Share link record and its access gates

use crate::utils::error::AccessError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Bearer-token capability granting access to one asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLink {
    /// Link ID
    pub id: Uuid,
    /// Unguessable lookup token
    pub token: String,
    /// Shared asset
    pub asset_id: Uuid,
    /// User who created the link
    pub created_by: Uuid,
    /// Argon2 hash of the link password
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    /// Absolute expiry; `None` never expires
    pub expires_at: Option<DateTime<Utc>>,
    /// Download ceiling; `None` is unlimited
    pub max_downloads: Option<u32>,
    /// Downloads counted against the ceiling
    pub current_downloads: u32,
    /// Whether download locators may be issued at all
    pub allow_download: bool,
    /// Soft-delete flag toggled by revoke/reactivate
    pub is_active: bool,
    /// Successful views
    pub view_count: u64,
    /// Successful downloads
    pub download_count: u64,
    /// Last successful view or download
    pub last_accessed_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Why a link refuses access
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareDenial {
    Revoked,
    Expired,
    LimitReached,
    DownloadsDisabled,
}

impl ShareDenial {
    pub fn reason(&self) -> &'static str {
        match self {
            ShareDenial::Revoked => "revoked",
            ShareDenial::Expired => "expired",
            ShareDenial::LimitReached => "limit reached",
            ShareDenial::DownloadsDisabled => "downloads disabled",
        }
    }
}

impl std::fmt::Display for ShareDenial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.reason())
    }
}

impl From<ShareDenial> for AccessError {
    fn from(denial: ShareDenial) -> Self {
        AccessError::forbidden(denial.reason())
    }
}

impl ShareLink {
    /// Expiry is re-evaluated on every read; there is no stored expired state.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    pub fn has_password(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn quota_exhausted(&self) -> bool {
        self.max_downloads
            .is_some_and(|max| self.current_downloads >= max)
    }

    /// Gate for viewing: active and not expired
    pub fn view_denial(&self, now: DateTime<Utc>) -> Option<ShareDenial> {
        if !self.is_active {
            Some(ShareDenial::Revoked)
        } else if self.is_expired(now) {
            Some(ShareDenial::Expired)
        } else {
            None
        }
    }

    /// Checks applied when a recipient opens the link
    pub fn access_denial(&self, now: DateTime<Utc>) -> Option<ShareDenial> {
        self.view_denial(now).or_else(|| {
            self.quota_exhausted()
                .then_some(ShareDenial::LimitReached)
        })
    }

    /// Gate for downloading
    pub fn download_denial(&self, now: DateTime<Utc>) -> Option<ShareDenial> {
        self.access_denial(now).or_else(|| {
            (!self.allow_download).then_some(ShareDenial::DownloadsDisabled)
        })
    }

    pub fn can_download(&self, now: DateTime<Utc>) -> bool {
        self.download_denial(now).is_none()
    }

    pub fn remaining_downloads(&self) -> Option<u32> {
        self.max_downloads
            .map(|max| max.saturating_sub(self.current_downloads))
    }
}
