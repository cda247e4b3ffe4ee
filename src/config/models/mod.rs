//! Configuration data models
//!
//! This module defines all configuration structures used by the access core.

#![allow(missing_docs)]

pub mod database;
pub mod logging;
pub mod rbac;
pub mod sharing;
pub mod storage;

pub use database::*;
pub use logging::*;
pub use rbac::*;
pub use sharing::*;
pub use storage::*;

/// Default maximum database connections
pub fn default_max_connections() -> u32 {
    10
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

/// Default lifetime of a minted object locator, in seconds
pub fn default_locator_ttl() -> u64 {
    300
}

/// Default share token entropy, in bytes
pub fn default_token_bytes() -> usize {
    32
}

pub fn default_max_token_attempts() -> u32 {
    5
}

pub fn default_top_countries() -> usize {
    5
}

pub fn default_log_level() -> String {
    "info".to_string()
}
