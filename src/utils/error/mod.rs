//! Error handling for the access core
//!
//! This module defines the error taxonomy shared by permission resolution,
//! role templates, share links and the storage adapters.

#![allow(missing_docs)]

mod helpers;
mod types;

pub use types::{AccessError, Result};
