//! Error type definitions

use thiserror::Error;

/// Result type alias for the access core
pub type Result<T> = std::result::Result<T, AccessError>;

/// Main error type for the access core
#[derive(Error, Debug)]
pub enum AccessError {
    /// Unknown user, asset, share link or template
    #[error("Not found: {0}")]
    NotFound(String),

    /// The current state forbids the action (inactive, expired or exhausted
    /// link, insufficient role)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A presented credential was rejected
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed input
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Duplicate record or exhausted token space
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The entity is in a state that makes the transition impossible
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Crypto errors
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}
