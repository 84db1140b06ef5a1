//! Database migrations for the address service.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20240101_000001_create_address_table::Migration)]
    }
}

mod m20240101_000001_create_address_table {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(AddressAddresses::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(AddressAddresses::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(AddressAddresses::Name).string_len(64))
                        .col(
                            ColumnDef::new(AddressAddresses::IsDefault)
                                .boolean()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AddressAddresses::Street)
                                .string_len(255)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AddressAddresses::Neighborhood)
                                .string_len(150)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AddressAddresses::City)
                                .string_len(150)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AddressAddresses::Postcode)
                                .string_len(9)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AddressAddresses::State)
                                .string_len(2)
                                .not_null(),
                        )
                        .col(ColumnDef::new(AddressAddresses::Number).integer())
                        .col(ColumnDef::new(AddressAddresses::Complement).string_len(150))
                        .col(ColumnDef::new(AddressAddresses::Lat).double())
                        .col(ColumnDef::new(AddressAddresses::Lng).double())
                        // No foreign key behind the pair: one table serves
                        // every owner type, integrity lives in the write path
                        .col(
                            ColumnDef::new(AddressAddresses::Discriminator)
                                .string()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AddressAddresses::ParentId)
                                .big_integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(AddressAddresses::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(AddressAddresses::UpdatedAt)
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
                .drop_table(Table::drop().table(AddressAddresses::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum AddressAddresses {
        Table,
        Id,
        Name,
        IsDefault,
        Street,
        Neighborhood,
        City,
        Postcode,
        State,
        Number,
        Complement,
        Lat,
        Lng,
        Discriminator,
        ParentId,
        CreatedAt,
        UpdatedAt,
    }
}
