//! Environment variable overrides
//!
//! Variables use the `ASSETGATE_` prefix. Unset variables leave the
//! corresponding field untouched.

use super::Config;
use crate::utils::error::{AccessError, Result};
use std::str::FromStr;
use tracing::debug;

fn parse_var<T: FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| AccessError::config(format!("Invalid value for {}: {}", name, e)))
}

impl Config {
    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_env_overrides_from(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable source
    pub fn apply_env_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("ASSETGATE_DATABASE_URL") {
            self.database.url = url;
        }
        if let Some(v) = lookup("ASSETGATE_DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = parse_var("ASSETGATE_DATABASE_MAX_CONNECTIONS", &v)?;
        }
        if let Some(url) = lookup("ASSETGATE_STORAGE_BASE_URL") {
            self.storage.base_url = url;
        }
        if let Some(secret) = lookup("ASSETGATE_STORAGE_SIGNING_SECRET") {
            self.storage.signing_secret = secret;
        }
        if let Some(v) = lookup("ASSETGATE_LOCATOR_TTL_SECS") {
            self.storage.locator_ttl_secs = parse_var("ASSETGATE_LOCATOR_TTL_SECS", &v)?;
        }
        if let Some(url) = lookup("ASSETGATE_PUBLIC_BASE_URL") {
            self.sharing.public_base_url = url;
        }
        if let Some(v) = lookup("ASSETGATE_TOKEN_BYTES") {
            self.sharing.token_bytes = parse_var("ASSETGATE_TOKEN_BYTES", &v)?;
        }
        if let Some(level) = lookup("ASSETGATE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(v) = lookup("ASSETGATE_LOG_JSON") {
            self.logging.json = parse_var("ASSETGATE_LOG_JSON", &v)?;
        }

        debug!("Applied environment overrides");
        Ok(())
    }
}
