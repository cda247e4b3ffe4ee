//! Authentication and Security utilities
//!
//! This module provides password hashing, token generation and URL signing.

pub mod crypto;

pub use crypto::*;
