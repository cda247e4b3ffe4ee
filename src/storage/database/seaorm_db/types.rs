use sea_orm::DatabaseConnection;

/// SeaORM-backed store implementing every repository trait
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    pub(super) db: DatabaseConnection,
    pub(super) backend_type: DatabaseBackendType,
}

/// Database backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackendType {
    PostgreSQL,
    SQLite,
}
