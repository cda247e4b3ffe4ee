//! Integration tests for assetgate
//!
//! These tests drive the services against a real in-memory SQLite store
//! without mocking.

pub mod config_tests;
#[cfg(feature = "sqlite")]
pub mod seaorm_store_tests;
#[cfg(feature = "sqlite")]
pub mod share_flow_tests;
