use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoleTemplates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RoleTemplates::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // One template per role; saves upsert on this key
                    .col(
                        ColumnDef::new(RoleTemplates::Role)
                            .string_len(32)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(RoleTemplates::Permissions).json().not_null())
                    .col(ColumnDef::new(RoleTemplates::Description).text().null())
                    .col(ColumnDef::new(RoleTemplates::Category).string_len(64).null())
                    .col(ColumnDef::new(RoleTemplates::UpdatedBy).uuid().null())
                    .col(
                        ColumnDef::new(RoleTemplates::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(RoleTemplates::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RoleTemplates::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum RoleTemplates {
    Table,
    Id,
    Role,
    Permissions,
    Description,
    Category,
    UpdatedBy,
    CreatedAt,
    UpdatedAt,
}
