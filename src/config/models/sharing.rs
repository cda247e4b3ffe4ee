//! Share link configuration

use super::{default_max_token_attempts, default_token_bytes, default_top_countries};
use serde::{Deserialize, Serialize};

/// Share link settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharingConfig {
    /// Public origin share URLs are built from
    pub public_base_url: String,
    /// Random bytes per token
    #[serde(default = "default_token_bytes")]
    pub token_bytes: usize,
    /// Attempts to find an unused token before giving up
    #[serde(default = "default_max_token_attempts")]
    pub max_token_attempts: u32,
    /// Number of countries reported in link statistics
    #[serde(default = "default_top_countries")]
    pub top_countries: usize,
}

impl Default for SharingConfig {
    fn default() -> Self {
        Self {
            public_base_url: "http://localhost:3000".to_string(),
            token_bytes: default_token_bytes(),
            max_token_attempts: default_max_token_attempts(),
            top_countries: default_top_countries(),
        }
    }
}
