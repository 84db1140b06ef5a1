//! SeaORM entities for store tables.

/// Store segments module
pub mod segment {
    use sea_orm::entity::prelude::*;

    /// Segments table entity
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "store_segments")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,

        pub title: String,
        pub is_active: bool,
        pub image: Option<String>,
        pub color: Option<String>,

        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(has_many = "super::store::Entity")]
        Stores,
    }

    impl Related<super::store::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Stores.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Stores module
pub mod store {
    use sea_orm::entity::prelude::*;

    /// Stores table entity
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "store_stores")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,

        pub title: String,
        pub legal: Option<String>,
        pub phones: Option<Json>,
        pub information: Option<Json>,
        pub external_data: Option<Json>,
        pub automatic_accept: bool,
        pub is_active: bool,

        /// `cpf` or `cnpj`
        pub document_type: String,

        #[sea_orm(unique)]
        pub document_number: String,

        pub approved_at: Option<DateTimeUtc>,
        pub segment_id: Option<i64>,
        pub image: Option<String>,
        pub background_image: Option<String>,

        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::segment::Entity",
            from = "Column::SegmentId",
            to = "super::segment::Column::Id"
        )]
        Segment,
        #[sea_orm(has_many = "super::person::Entity")]
        People,
    }

    impl Related<super::segment::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Segment.def()
        }
    }

    impl Related<super::person::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::People.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}

/// Store membership module
pub mod person {
    use sea_orm::entity::prelude::*;

    /// Store people table entity
    #[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
    #[sea_orm(table_name = "store_people")]
    pub struct Model {
        #[sea_orm(primary_key)]
        pub id: i64,

        pub store_id: i64,
        pub user_id: i64,
        pub is_owner: bool,
        pub is_staff: bool,
        pub is_active: bool,

        pub created_at: DateTimeUtc,
        pub updated_at: DateTimeUtc,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {
        #[sea_orm(
            belongs_to = "super::store::Entity",
            from = "Column::StoreId",
            to = "super::store::Column::Id"
        )]
        Store,
    }

    impl Related<super::store::Entity> for Entity {
        fn to() -> RelationDef {
            Relation::Store.def()
        }
    }

    impl ActiveModelBehavior for ActiveModel {}
}
