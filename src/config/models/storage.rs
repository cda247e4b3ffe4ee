//! Object storage locator configuration

use super::default_locator_ttl;
use serde::{Deserialize, Serialize};

/// Settings for minting short-lived object URLs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectStorageConfig {
    /// Base URL objects are served from
    pub base_url: String,
    /// HMAC key used to sign locators
    #[serde(default)]
    pub signing_secret: String,
    /// Lifetime of a minted locator in seconds
    #[serde(default = "default_locator_ttl")]
    pub locator_ttl_secs: u64,
}

impl Default for ObjectStorageConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:9000/objects".to_string(),
            signing_secret: String::new(),
            locator_ttl_secs: default_locator_ttl(),
        }
    }
}
