//! SeaORM entities for user tables.

use sea_orm::entity::prelude::*;

/// Users table entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "user_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: String,

    #[sea_orm(unique)]
    pub email: String,

    #[sea_orm(unique)]
    pub nickname: String,

    #[sea_orm(unique)]
    pub document_number: String,

    pub phones: Option<Json>,
    pub avatar: Option<Json>,
    pub external_data: Option<Json>,
    pub birthdate: Option<Date>,

    /// Argon2 PHC string
    pub password: String,

    pub is_admin: bool,
    pub is_celebrity: bool,
    pub accept_legal_term: bool,
    pub email_verified_at: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Password reset tokens module
pub mod password_reset {
    use sea_orm::entity::prelude::*;

    /// Password resets table entity
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "user_password_resets")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,

        #[sea_orm(unique)]
        pub email: String,

        pub token: String,

        pub created_at: DateTimeUtc,
        pub expire_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}
