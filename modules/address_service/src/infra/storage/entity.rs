//! SeaORM entity for the address table.

use sea_orm::entity::prelude::*;

/// One table holds the address records of every owner type.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "address_addresses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub name: Option<String>,
    pub is_default: bool,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub postcode: String,
    pub state: String,
    pub number: Option<i32>,
    pub complement: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,

    /// Owner type tag. Together with `parent_id` it identifies the owning
    /// row; there is deliberately no foreign key behind the pair.
    pub discriminator: String,
    pub parent_id: i64,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
