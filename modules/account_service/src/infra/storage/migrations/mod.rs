//! Database migrations for the account service.

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_user_table::Migration),
            Box::new(m20240101_000002_create_password_reset_table::Migration),
        ]
    }
}

mod m20240101_000001_create_user_table {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(UserUsers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserUsers::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(UserUsers::Name).string_len(255).not_null())
                        .col(
                            ColumnDef::new(UserUsers::Email)
                                .string_len(255)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(UserUsers::Nickname)
                                .string_len(128)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(UserUsers::DocumentNumber)
                                .string_len(32)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(UserUsers::Phones).json())
                        .col(ColumnDef::new(UserUsers::Avatar).json())
                        .col(ColumnDef::new(UserUsers::ExternalData).json())
                        .col(ColumnDef::new(UserUsers::Birthdate).date())
                        .col(ColumnDef::new(UserUsers::Password).string_len(255).not_null())
                        .col(
                            ColumnDef::new(UserUsers::IsAdmin)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(UserUsers::IsCelebrity)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(UserUsers::AcceptLegalTerm)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(UserUsers::EmailVerifiedAt).timestamp_with_time_zone())
                        .col(
                            ColumnDef::new(UserUsers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(UserUsers::UpdatedAt)
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
                .drop_table(Table::drop().table(UserUsers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub(super) enum UserUsers {
        Table,
        Id,
        Name,
        Email,
        Nickname,
        DocumentNumber,
        Phones,
        Avatar,
        ExternalData,
        Birthdate,
        Password,
        IsAdmin,
        IsCelebrity,
        AcceptLegalTerm,
        EmailVerifiedAt,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240101_000002_create_password_reset_table {
    use super::*;

    #[derive(DeriveMigrationName)]
    pub struct Migration;

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(UserPasswordResets::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(UserPasswordResets::Id)
                                .big_integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(UserPasswordResets::Email)
                                .string_len(255)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(UserPasswordResets::Token)
                                .string_len(255)
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(UserPasswordResets::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null()
                                .default(Expr::current_timestamp()),
                        )
                        .col(
                            ColumnDef::new(UserPasswordResets::ExpireAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(UserPasswordResets::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    enum UserPasswordResets {
        Table,
        Id,
        Email,
        Token,
        CreatedAt,
        ExpireAt,
    }
}
