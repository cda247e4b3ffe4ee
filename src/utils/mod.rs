//! Utility modules for the access core
//!
//! - **auth**: password hashing, token generation and URL signing
//! - **error**: error taxonomy shared by every component
//! - **logging**: tracing subscriber setup
//! - **sys**: clock and other system seams

pub mod auth;
pub mod error;
pub mod logging;
pub mod sys;

pub use error::{AccessError, Result};
pub use sys::{Clock, ManualClock, SystemClock};
