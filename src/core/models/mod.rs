//! Core data models for the access core
//!
//! This module defines the records the permission resolver and the share
//! link manager operate on.

pub mod asset;
pub mod role_template;
pub mod share_link;
pub mod user;

pub use asset::{Asset, AssetFile};
pub use role_template::RoleTemplate;
pub use share_link::{ShareDenial, ShareLink};
pub use user::{User, UserRole};
