//! Database storage implementation using SeaORM
//!
//! Every repository trait backed by SQLite or PostgreSQL.

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
/// SeaORM store implementation module
pub mod seaorm_db;

pub use seaorm_db::{DatabaseBackendType, SeaOrmStore};
