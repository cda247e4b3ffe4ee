//! Object storage locators
//!
//! The access core never streams bytes. It mints short-lived URLs that an
//! object store (or a proxy in front of it) honours after checking the
//! signature.

use crate::config::ObjectStorageConfig;
use crate::core::models::AssetFile;
use crate::utils::auth::crypto::{create_hmac_signature, verify_hmac_signature};
use crate::utils::error::{AccessError, Result};
use crate::utils::sys::Clock;
use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use url::Url;

/// What a locator is minted for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocatorPurpose {
    Preview,
    Download,
}

impl LocatorPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocatorPurpose::Preview => "preview",
            LocatorPurpose::Download => "download",
        }
    }
}

/// Time-boxed URL for one stored object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLocator {
    pub url: String,
    pub purpose: LocatorPurpose,
    pub expires_at: DateTime<Utc>,
    /// Filename the client should save as; set for downloads
    pub file_name: Option<String>,
}

/// Mints locators for stored files
#[async_trait]
pub trait ObjectLocator: Send + Sync {
    async fn locate(&self, file: &AssetFile, purpose: LocatorPurpose) -> Result<ResourceLocator>;
}

/// HMAC-SHA256 signed URL locator
#[derive(Clone)]
pub struct SignedUrlLocator {
    base_url: Url,
    secret: String,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for SignedUrlLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedUrlLocator")
            .field("base_url", &self.base_url.as_str())
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SignedUrlLocator {
    pub fn new(config: &ObjectStorageConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| AccessError::config(format!("Invalid storage.base_url: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(AccessError::config("storage.base_url cannot be a base URL"));
        }
        if config.signing_secret.is_empty() {
            return Err(AccessError::config("storage.signing_secret is not set"));
        }
        let ttl_secs = i64::try_from(config.locator_ttl_secs)
            .map_err(|_| AccessError::config("storage.locator_ttl_secs is too large"))?;

        Ok(Self {
            base_url,
            secret: config.signing_secret.clone(),
            ttl: Duration::seconds(ttl_secs),
            clock,
        })
    }

    fn signing_payload(
        path: &str,
        purpose: &str,
        expires: i64,
        file_name: Option<&str>,
    ) -> String {
        format!("{}\n{}\n{}\n{}", path, purpose, expires, file_name.unwrap_or(""))
    }

    /// Check that a URL minted by this locator is intact and unexpired
    pub fn verify(&self, locator_url: &str) -> Result<bool> {
        let url = Url::parse(locator_url)
            .map_err(|e| AccessError::bad_request(format!("Invalid locator URL: {}", e)))?;

        let mut purpose = None;
        let mut expires = None;
        let mut file_name = None;
        let mut signature = None;
        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "purpose" => purpose = Some(value.into_owned()),
                "expires" => expires = value.parse::<i64>().ok(),
                "filename" => file_name = Some(value.into_owned()),
                "signature" => signature = Some(value.into_owned()),
                _ => return Ok(false),
            }
        }

        let (Some(purpose), Some(expires), Some(signature)) = (purpose, expires, signature)
        else {
            return Ok(false);
        };
        if self.clock.now().timestamp() >= expires {
            return Ok(false);
        }

        let payload = Self::signing_payload(url.path(), &purpose, expires, file_name.as_deref());
        verify_hmac_signature(&self.secret, &payload, &signature)
    }
}

#[async_trait]
impl ObjectLocator for SignedUrlLocator {
    async fn locate(&self, file: &AssetFile, purpose: LocatorPurpose) -> Result<ResourceLocator> {
        let expires_at = self.clock.now() + self.ttl;
        let expires = expires_at.timestamp();
        let file_name = match purpose {
            LocatorPurpose::Download => Some(file.file_name.clone()),
            LocatorPurpose::Preview => None,
        };

        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| AccessError::internal("Object base URL cannot hold a path"))?;
            segments
                .pop_if_empty()
                .extend(file.storage_key.split('/').filter(|s| !s.is_empty()));
        }

        let payload =
            Self::signing_payload(url.path(), purpose.as_str(), expires, file_name.as_deref());
        let signature = create_hmac_signature(&self.secret, &payload)?;

        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("purpose", purpose.as_str())
                .append_pair("expires", &expires.to_string());
            if let Some(file_name) = &file_name {
                query.append_pair("filename", file_name);
            }
            query.append_pair("signature", &signature);
        }

        Ok(ResourceLocator {
            url: url.to_string(),
            purpose,
            expires_at: Utc
                .timestamp_opt(expires, 0)
                .single()
                .unwrap_or(expires_at),
            file_name,
        })
    }
}
