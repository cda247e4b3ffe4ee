use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users_and_assets_tables;
mod m20250101_000002_create_role_templates_table;
mod m20250101_000003_create_share_links_tables;
mod m20250101_000004_create_audit_logs_table;

/// Database migrator for SeaORM
pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users_and_assets_tables::Migration),
            Box::new(m20250101_000002_create_role_templates_table::Migration),
            Box::new(m20250101_000003_create_share_links_tables::Migration),
            Box::new(m20250101_000004_create_audit_logs_table::Migration),
        ]
    }
}
