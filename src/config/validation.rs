//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use crate::utils::auth::crypto::MIN_TOKEN_BYTES;
use crate::utils::error::{AccessError, Result};
use tracing::debug;
use url::Url;

/// Configuration validation trait
pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn validate_http_url(url_str: &str, context: &str) -> Result<()> {
    let url = Url::parse(url_str)
        .map_err(|e| AccessError::config(format!("{} has invalid URL format: {}", context, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AccessError::config(format!(
            "{} must use http:// or https:// scheme, got: {}",
            context, scheme
        ))),
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(AccessError::config("database.url must not be empty"));
        }
        if self.max_connections == 0 {
            return Err(AccessError::config(
                "database.max_connections must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Validate for ObjectStorageConfig {
    fn validate(&self) -> Result<()> {
        validate_http_url(&self.base_url, "storage.base_url")?;
        if self.signing_secret.len() < 16 {
            return Err(AccessError::config(
                "storage.signing_secret must be at least 16 characters",
            ));
        }
        if self.locator_ttl_secs == 0 {
            return Err(AccessError::config(
                "storage.locator_ttl_secs must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Validate for SharingConfig {
    fn validate(&self) -> Result<()> {
        validate_http_url(&self.public_base_url, "sharing.public_base_url")?;
        if self.token_bytes < MIN_TOKEN_BYTES {
            return Err(AccessError::config(format!(
                "sharing.token_bytes must be at least {} (128 bits)",
                MIN_TOKEN_BYTES
            )));
        }
        if self.max_token_attempts == 0 {
            return Err(AccessError::config(
                "sharing.max_token_attempts must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Validate for RbacConfig {
    fn validate(&self) -> Result<()> {
        if self.admin_roles.is_empty() {
            return Err(AccessError::config(
                "rbac.admin_roles must name at least one role",
            ));
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<()> {
        if self.level.trim().is_empty() {
            return Err(AccessError::config("logging.level must not be empty"));
        }
        Ok(())
    }
}

impl Validate for super::Config {
    fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.database.validate()?;
        self.storage.validate()?;
        self.sharing.validate()?;
        self.rbac.validate()?;
        self.logging.validate()?;

        debug!("Configuration validation completed");
        Ok(())
    }
}
