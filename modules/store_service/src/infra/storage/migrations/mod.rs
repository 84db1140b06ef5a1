//! Database migrations for the store service.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_segment_table::Migration),
            Box::new(m20240101_000002_create_store_tables::Migration),
        ]
    }
}

mod m20240101_000001_create_segment_table {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StoreSegments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StoreSegments::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(StoreSegments::Title).string_len(64).not_null())
                        .col(
                            ColumnDef::new(StoreSegments::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(ColumnDef::new(StoreSegments::Image).string())
                        .col(ColumnDef::new(StoreSegments::Color).string())
                        .col(
                            ColumnDef::new(StoreSegments::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(StoreSegments::UpdatedAt)
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
                .drop_table(Table::drop().table(StoreSegments::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum StoreSegments {
        Table,
        Id,
        Title,
        IsActive,
        Image,
        Color,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000002_create_store_tables {
    use super::m20240101_000001_create_segment_table::StoreSegments;
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(StoreStores::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StoreStores::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(StoreStores::Title).string_len(64).not_null())
                        .col(ColumnDef::new(StoreStores::Legal).string())
                        .col(ColumnDef::new(StoreStores::Phones).json())
                        .col(ColumnDef::new(StoreStores::Information).json())
                        .col(ColumnDef::new(StoreStores::ExternalData).json())
                        .col(
                            ColumnDef::new(StoreStores::AutomaticAccept)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(StoreStores::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(StoreStores::DocumentType)
                                .string_len(8)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(StoreStores::DocumentNumber)
                                .string_len(32)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(StoreStores::ApprovedAt).timestamp_with_time_zone())
                        .col(ColumnDef::new(StoreStores::SegmentId).big_integer())
                        .col(ColumnDef::new(StoreStores::Image).string())
                        .col(ColumnDef::new(StoreStores::BackgroundImage).string())
                        .col(
                            ColumnDef::new(StoreStores::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(StoreStores::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_store_stores_segment")
                                .from(StoreStores::Table, StoreStores::SegmentId)
                                .to(StoreSegments::Table, StoreSegments::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StorePeople::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StorePeople::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(StorePeople::StoreId).big_integer().not_null())
                        .col(ColumnDef::new(StorePeople::UserId).big_integer().not_null())
                        .col(
                            ColumnDef::new(StorePeople::IsOwner)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(StorePeople::IsStaff)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(StorePeople::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(StorePeople::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(StorePeople::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_store_people_store")
                                .from(StorePeople::Table, StorePeople::StoreId)
                                .to(StoreStores::Table, StoreStores::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StorePeople::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(StoreStores::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum StoreStores {
        Table,
        Id,
        Title,
        Legal,
        Phones,
        Information,
        ExternalData,
        AutomaticAccept,
        IsActive,
        DocumentType,
        DocumentNumber,
        ApprovedAt,
        SegmentId,
        Image,
        BackgroundImage,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    enum StorePeople {
        Table,
        Id,
        StoreId,
        UserId,
        IsOwner,
        IsStaff,
        IsActive,
        CreatedAt,
        UpdatedAt,
    }
}
