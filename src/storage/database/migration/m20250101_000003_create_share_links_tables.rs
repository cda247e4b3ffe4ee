use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ShareLinks::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(ShareLinks::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(ShareLinks::Token)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(ShareLinks::AssetId).uuid().not_null())
                    .col(ColumnDef::new(ShareLinks::CreatedBy).uuid().not_null())
                    .col(ColumnDef::new(ShareLinks::PasswordHash).string_len(255).null())
                    .col(
                        ColumnDef::new(ShareLinks::ExpiresAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(ColumnDef::new(ShareLinks::MaxDownloads).integer().null())
                    .col(
                        ColumnDef::new(ShareLinks::CurrentDownloads)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ShareLinks::AllowDownload)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ShareLinks::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(ShareLinks::ViewCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ShareLinks::DownloadCount)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ShareLinks::LastAccessedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(ShareLinks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ShareLinks::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_share_links_asset_id")
                            .from(ShareLinks::Table, ShareLinks::AssetId)
                            .to(Assets::Table, Assets::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_share_links_asset_id")
                    .table(ShareLinks::Table)
                    .col(ShareLinks::AssetId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ShareAccessLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ShareAccessLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ShareAccessLogs::ShareLinkId).uuid().not_null())
                    .col(
                        ColumnDef::new(ShareAccessLogs::AccessType)
                            .string_len(16)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ShareAccessLogs::IpAddress).string_len(64).null())
                    .col(ColumnDef::new(ShareAccessLogs::UserAgent).text().null())
                    .col(ColumnDef::new(ShareAccessLogs::Referrer).text().null())
                    .col(ColumnDef::new(ShareAccessLogs::Country).string_len(64).null())
                    .col(
                        ColumnDef::new(ShareAccessLogs::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_share_access_logs_share_link_id")
                            .from(ShareAccessLogs::Table, ShareAccessLogs::ShareLinkId)
                            .to(ShareLinks::Table, ShareLinks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_share_access_logs_share_link_id")
                    .table(ShareAccessLogs::Table)
                    .col(ShareAccessLogs::ShareLinkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ShareAccessLogs::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ShareLinks::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum ShareLinks {
    Table,
    Id,
    Token,
    AssetId,
    CreatedBy,
    PasswordHash,
    ExpiresAt,
    MaxDownloads,
    CurrentDownloads,
    AllowDownload,
    IsActive,
    ViewCount,
    DownloadCount,
    LastAccessedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ShareAccessLogs {
    Table,
    Id,
    ShareLinkId,
    AccessType,
    IpAddress,
    UserAgent,
    Referrer,
    Country,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Assets {
    Table,
    Id,
}
