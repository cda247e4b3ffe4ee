//! Services module
//!
//! Wiring of the access core services

pub mod access;

pub use access::{AccessServices, AccessServicesBuilder};
