//! Secure share links
//!
//! Bearer-token links to a single asset with optional password, expiry and
//! download quota.

mod access;
mod lifecycle;
pub mod manager;
pub mod stats;
pub mod token;
pub mod types;

#[cfg(test)]
mod tests;

pub use manager::{ShareLinkDeps, ShareLinkManager};
pub use token::{RandomTokenGenerator, TokenGenerator};
pub use types::{
    CountryCount, CreateShareLink, CreatedShareLink, SharedAsset, SharedAssetInfo,
    ShareLinkStats, ShareLinkSummary,
};
