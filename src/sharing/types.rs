//! Share link request and response types

use crate::core::models::{Asset, ShareLink};
use crate::storage::ResourceLocator;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Options for a new share link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateShareLink {
    /// Plaintext password; hashed before storage
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    /// Must be at least 1 when set
    #[serde(default)]
    pub max_downloads: Option<u32>,
    #[serde(default = "default_allow_download")]
    pub allow_download: bool,
}

fn default_allow_download() -> bool {
    true
}

impl Default for CreateShareLink {
    fn default() -> Self {
        Self {
            password: None,
            expires_at: None,
            max_downloads: None,
            allow_download: default_allow_download(),
        }
    }
}

impl CreateShareLink {
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn max_downloads(mut self, max_downloads: u32) -> Self {
        self.max_downloads = Some(max_downloads);
        self
    }

    pub fn view_only(mut self) -> Self {
        self.allow_download = false;
        self
    }
}

/// Newly created link and its public URL
#[derive(Debug, Clone, Serialize)]
pub struct CreatedShareLink {
    pub link: ShareLink,
    pub url: String,
}

/// Asset fields exposed to share link recipients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedAssetInfo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub size_bytes: Option<u64>,
}

impl From<&Asset> for SharedAssetInfo {
    fn from(asset: &Asset) -> Self {
        Self {
            id: asset.id,
            title: asset.title.clone(),
            description: asset.description.clone(),
            file_name: asset.file.as_ref().map(|f| f.file_name.clone()),
            content_type: asset.file.as_ref().and_then(|f| f.content_type.clone()),
            size_bytes: asset.file.as_ref().and_then(|f| f.size_bytes),
        }
    }
}

/// Link fields exposed to share link recipients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinkSummary {
    pub id: Uuid,
    pub expires_at: Option<DateTime<Utc>>,
    pub allow_download: bool,
    pub max_downloads: Option<u32>,
    pub remaining_downloads: Option<u32>,
    pub has_password: bool,
}

impl From<&ShareLink> for ShareLinkSummary {
    fn from(link: &ShareLink) -> Self {
        Self {
            id: link.id,
            expires_at: link.expires_at,
            allow_download: link.allow_download,
            max_downloads: link.max_downloads,
            remaining_downloads: link.remaining_downloads(),
            has_password: link.has_password(),
        }
    }
}

/// What a recipient sees when opening a link
#[derive(Debug, Clone, Serialize)]
pub struct SharedAsset {
    pub asset: SharedAssetInfo,
    pub link: ShareLinkSummary,
    /// A password must be supplied before locators are issued
    pub requires_password: bool,
    pub preview: Option<ResourceLocator>,
    /// Present only while the download gate passes
    pub download: Option<ResourceLocator>,
}

/// Per-country access count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryCount {
    pub country: String,
    pub count: u64,
}

/// Access statistics of one link, derived from its access log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareLinkStats {
    pub share_link_id: Uuid,
    pub views: u64,
    pub downloads: u64,
    pub unique_ips: usize,
    pub top_countries: Vec<CountryCount>,
    pub first_access_at: Option<DateTime<Utc>>,
    pub last_access_at: Option<DateTime<Utc>>,
}
