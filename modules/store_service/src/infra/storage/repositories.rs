//! SeaORM repository implementations.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use mercato_query::{
    search_filter_sort_paginate, EntitySchema, FieldKind, FieldMap, FilterClause, Page,
    PageLimits, QueryError, SortClause,
};
use once_cell::sync::Lazy;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, TransactionTrait,
};
use tracing::error;

use super::entity;
use super::mapper::into_store;
use crate::contract::{
    NewSegment, NewStore, Segment, SegmentPatch, Store, StoreError, StorePatch,
};
use crate::domain::repository::{SegmentsRepository, StoreUniqueProbe, StoresRepository};

static SEGMENT_SCHEMA: Lazy<EntitySchema<entity::segment::Entity>> = Lazy::new(|| {
    use entity::segment::Column;
    EntitySchema::new(
        "Segment",
        FieldMap::new()
            .insert("id", Column::Id, FieldKind::I64)
            .insert("title", Column::Title, FieldKind::String)
            .insert("is_active", Column::IsActive, FieldKind::Bool)
            .insert("color", Column::Color, FieldKind::String)
            .insert("created_at", Column::CreatedAt, FieldKind::DateTimeUtc)
            .insert("updated_at", Column::UpdatedAt, FieldKind::DateTimeUtc),
    )
});

static STORE_SCHEMA: Lazy<EntitySchema<entity::store::Entity>> = Lazy::new(|| {
    use entity::store::Column;
    EntitySchema::new(
        "Store",
        FieldMap::new()
            .insert("id", Column::Id, FieldKind::I64)
            .insert("title", Column::Title, FieldKind::String)
            .insert("legal", Column::Legal, FieldKind::String)
            .insert("automatic_accept", Column::AutomaticAccept, FieldKind::Bool)
            .insert("is_active", Column::IsActive, FieldKind::Bool)
            .insert("document_type", Column::DocumentType, FieldKind::String)
            .insert("document_number", Column::DocumentNumber, FieldKind::String)
            .insert("approved_at", Column::ApprovedAt, FieldKind::DateTimeUtc)
            .insert("segment_id", Column::SegmentId, FieldKind::I64)
            .insert("created_at", Column::CreatedAt, FieldKind::DateTimeUtc)
            .insert("updated_at", Column::UpdatedAt, FieldKind::DateTimeUtc),
    )
});

/// Map a storage failure, folding unique violations into the advisory
/// `Conflict` kind and FK violations into a validation error.
fn map_db_err(err: sea_orm::DbErr) -> StoreError {
    match err.sql_err() {
        Some(sea_orm::SqlErr::UniqueConstraintViolation(message)) => {
            let fields: Vec<String> = ["document_number", "title", "legal"]
                .iter()
                .filter(|field| message.contains(*field))
                .map(|field| (*field).to_owned())
                .collect();
            StoreError::Conflict {
                fields: if fields.is_empty() {
                    vec!["unique".to_owned()]
                } else {
                    fields
                },
            }
        }
        Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) => StoreError::Validation {
            message: "referenced row does not exist".to_owned(),
        },
        _ => {
            error!(error = %err, "store storage error");
            StoreError::Internal
        }
    }
}

// ===== Segments Repository =====

pub struct SeaOrmSegmentsRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmSegmentsRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SegmentsRepository for SeaOrmSegmentsRepository {
    async fn create(&self, segment: NewSegment) -> Result<Segment, StoreError> {
        let now = Utc::now();
        let active = entity::segment::ActiveModel {
            title: Set(segment.title),
            is_active: Set(segment.is_active),
            image: Set(segment.image),
            color: Set(segment.color),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&*self.db).await.map_err(map_db_err)?;
        Ok(model.into())
    }

    async fn find(&self, id: i64) -> Result<Option<Segment>, StoreError> {
        let model = entity::segment::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(model.map(Into::into))
    }

    async fn title_exists(
        &self,
        title: &str,
        exclude_id: Option<i64>,
    ) -> Result<bool, StoreError> {
        let mut query =
            entity::segment::Entity::find().filter(entity::segment::Column::Title.eq(title));
        if let Some(id) = exclude_id {
            query = query.filter(entity::segment::Column::Id.ne(id));
        }

        let count = query.count(&*self.db).await.map_err(map_db_err)?;
        Ok(count > 0)
    }

    async fn update(&self, id: i64, patch: SegmentPatch) -> Result<Option<Segment>, StoreError> {
        let Some(model) = entity::segment::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let mut active: entity::segment::ActiveModel = model.into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(image) = patch.image {
            active.image = Set(Some(image));
        }
        if let Some(color) = patch.color {
            active.color = Set(Some(color));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await.map_err(map_db_err)?;
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = entity::segment::Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn search(
        &self,
        filter_spec: Vec<FilterClause>,
        sort_spec: Vec<SortClause>,
        page: i64,
        items_per_page: i64,
        limits: &PageLimits,
    ) -> Result<Page<Segment>, QueryError> {
        let page = search_filter_sort_paginate(
            &*self.db,
            &SEGMENT_SCHEMA,
            &filter_spec,
            &sort_spec,
            page,
            items_per_page,
            limits,
        )
        .await?;

        Ok(page.map(Into::into))
    }
}

// ===== Stores Repository =====

pub struct SeaOrmStoresRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmStoresRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl StoresRepository for SeaOrmStoresRepository {
    async fn create(&self, store: NewStore, owner_user_id: i64) -> Result<Store, StoreError> {
        let now = Utc::now();

        // Store and owner membership land together or not at all
        let txn = self.db.begin().await.map_err(map_db_err)?;

        let active = entity::store::ActiveModel {
            title: Set(store.title),
            legal: Set(Some(store.legal)),
            phones: Set(store.phones),
            information: Set(store.information),
            external_data: Set(None),
            automatic_accept: Set(store.automatic_accept),
            is_active: Set(true),
            document_type: Set(store.document_type.as_str().to_owned()),
            document_number: Set(store.document_number),
            approved_at: Set(None),
            segment_id: Set(Some(store.segment_id)),
            image: Set(store.image),
            background_image: Set(store.background_image),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let model = active.insert(&txn).await.map_err(map_db_err)?;

        let person = entity::person::ActiveModel {
            store_id: Set(model.id),
            user_id: Set(owner_user_id),
            is_owner: Set(true),
            is_staff: Set(false),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        person.insert(&txn).await.map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;

        into_store(model).map_err(|_| StoreError::Internal)
    }

    async fn find(&self, id: i64) -> Result<Option<Store>, StoreError> {
        let Some(model) = entity::store::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };
        into_store(model).map(Some).map_err(|_| StoreError::Internal)
    }

    async fn conflicting_fields(
        &self,
        probe: &StoreUniqueProbe,
        exclude_id: Option<i64>,
    ) -> Result<Vec<String>, StoreError> {
        use entity::store::Column;

        let mut condition = Condition::any();
        let mut probed = false;
        if let Some(title) = &probe.title {
            condition = condition.add(Column::Title.eq(title));
            probed = true;
        }
        if let Some(legal) = &probe.legal {
            condition = condition.add(Column::Legal.eq(legal));
            probed = true;
        }
        if let Some(document_number) = &probe.document_number {
            condition = condition.add(Column::DocumentNumber.eq(document_number));
            probed = true;
        }
        if !probed {
            return Ok(Vec::new());
        }

        let mut query = entity::store::Entity::find().filter(condition);
        if let Some(id) = exclude_id {
            query = query.filter(Column::Id.ne(id));
        }

        let rows = query.all(&*self.db).await.map_err(map_db_err)?;

        let mut fields = Vec::new();
        if let Some(title) = &probe.title {
            if rows.iter().any(|row| &row.title == title) {
                fields.push("title".to_owned());
            }
        }
        if let Some(legal) = &probe.legal {
            if rows.iter().any(|row| row.legal.as_ref() == Some(legal)) {
                fields.push("legal".to_owned());
            }
        }
        if let Some(document_number) = &probe.document_number {
            if rows
                .iter()
                .any(|row| &row.document_number == document_number)
            {
                fields.push("document_number".to_owned());
            }
        }
        Ok(fields)
    }

    async fn update(&self, id: i64, patch: StorePatch) -> Result<Option<Store>, StoreError> {
        let Some(model) = entity::store::Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
        else {
            return Ok(None);
        };

        let mut active: entity::store::ActiveModel = model.into();
        if let Some(title) = patch.title {
            active.title = Set(title);
        }
        if let Some(legal) = patch.legal {
            active.legal = Set(Some(legal));
        }
        if let Some(phones) = patch.phones {
            active.phones = Set(Some(phones));
        }
        if let Some(information) = patch.information {
            active.information = Set(Some(information));
        }
        if let Some(automatic_accept) = patch.automatic_accept {
            active.automatic_accept = Set(automatic_accept);
        }
        if let Some(is_active) = patch.is_active {
            active.is_active = Set(is_active);
        }
        if let Some(document_type) = patch.document_type {
            active.document_type = Set(document_type.as_str().to_owned());
        }
        if let Some(document_number) = patch.document_number {
            active.document_number = Set(document_number);
        }
        if let Some(segment_id) = patch.segment_id {
            active.segment_id = Set(Some(segment_id));
        }
        if let Some(image) = patch.image {
            active.image = Set(Some(image));
        }
        if let Some(background_image) = patch.background_image {
            active.background_image = Set(Some(background_image));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await.map_err(map_db_err)?;
        into_store(model).map(Some).map_err(|_| StoreError::Internal)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        // Membership rows are removed explicitly, not left to the FK cascade
        let txn = self.db.begin().await.map_err(map_db_err)?;

        entity::person::Entity::delete_many()
            .filter(entity::person::Column::StoreId.eq(id))
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        let result = entity::store::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(map_db_err)?;

        txn.commit().await.map_err(map_db_err)?;
        Ok(result.rows_affected > 0)
    }

    async fn is_owner(&self, store_id: i64, user_id: i64) -> Result<bool, StoreError> {
        use entity::person::Column;

        let count = entity::person::Entity::find()
            .filter(Column::StoreId.eq(store_id))
            .filter(Column::UserId.eq(user_id))
            .filter(Column::IsOwner.eq(true))
            .filter(Column::IsActive.eq(true))
            .count(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(count > 0)
    }

    async fn search(
        &self,
        filter_spec: Vec<FilterClause>,
        sort_spec: Vec<SortClause>,
        page: i64,
        items_per_page: i64,
        limits: &PageLimits,
    ) -> Result<Page<Store>, QueryError> {
        let page = search_filter_sort_paginate(
            &*self.db,
            &STORE_SCHEMA,
            &filter_spec,
            &sort_spec,
            page,
            items_per_page,
            limits,
        )
        .await?;

        let mut items = Vec::with_capacity(page.items.len());
        for model in page.items {
            items.push(into_store(model).map_err(|e| QueryError::Db(e.to_string()))?);
        }

        Ok(Page {
            items,
            per_page: page.per_page,
            num_pages: page.num_pages,
            page: page.page,
            total: page.total,
        })
    }
}
