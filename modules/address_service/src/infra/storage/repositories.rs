//! SeaORM repository implementation.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use mercato_query::{
    search_filter_sort_paginate, EntitySchema, FieldKind, FieldMap, FilterClause, Page,
    PageLimits, QueryError, SortClause,
};
use once_cell::sync::Lazy;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use super::{entity, mapper::into_address};
use crate::contract::{Address, AddressPatch, NewAddress, OwnerRef};
use crate::domain::repository::AddressesRepository;

static SCHEMA: Lazy<EntitySchema<entity::Entity>> = Lazy::new(|| {
    EntitySchema::new(
        "Address",
        FieldMap::new()
            .insert("id", entity::Column::Id, FieldKind::I64)
            .insert("name", entity::Column::Name, FieldKind::String)
            .insert("is_default", entity::Column::IsDefault, FieldKind::Bool)
            .insert("street", entity::Column::Street, FieldKind::String)
            .insert(
                "neighborhood",
                entity::Column::Neighborhood,
                FieldKind::String,
            )
            .insert("city", entity::Column::City, FieldKind::String)
            .insert("postcode", entity::Column::Postcode, FieldKind::String)
            .insert("state", entity::Column::State, FieldKind::String)
            .insert("number", entity::Column::Number, FieldKind::I64)
            .insert("complement", entity::Column::Complement, FieldKind::String)
            .insert("lat", entity::Column::Lat, FieldKind::F64)
            .insert("lng", entity::Column::Lng, FieldKind::F64)
            .insert(
                "discriminator",
                entity::Column::Discriminator,
                FieldKind::String,
            )
            .insert("parent_id", entity::Column::ParentId, FieldKind::I64)
            .insert("created_at", entity::Column::CreatedAt, FieldKind::DateTimeUtc)
            .insert("updated_at", entity::Column::UpdatedAt, FieldKind::DateTimeUtc),
    )
});

pub struct SeaOrmAddressesRepository {
    db: Arc<DatabaseConnection>,
}

impl SeaOrmAddressesRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AddressesRepository for SeaOrmAddressesRepository {
    async fn create(&self, owner: OwnerRef, address: NewAddress) -> Result<Address> {
        let now = Utc::now();
        let active = entity::ActiveModel {
            name: Set(Some(address.name)),
            is_default: Set(address.is_default),
            street: Set(address.street),
            neighborhood: Set(address.neighborhood),
            city: Set(address.city),
            postcode: Set(address.postcode),
            state: Set(address.state),
            number: Set(address.number),
            complement: Set(address.complement),
            lat: Set(address.lat),
            lng: Set(address.lng),
            discriminator: Set(owner.type_tag().to_owned()),
            parent_id: Set(owner.id()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let model = active.insert(&*self.db).await?;
        into_address(model)
    }

    async fn find(&self, owner: OwnerRef, id: i64) -> Result<Option<Address>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::Discriminator.eq(owner.type_tag()))
            .filter(entity::Column::ParentId.eq(owner.id()))
            .one(&*self.db)
            .await?;

        model.map(into_address).transpose()
    }

    async fn update(
        &self,
        owner: OwnerRef,
        id: i64,
        patch: AddressPatch,
    ) -> Result<Option<Address>> {
        let Some(model) = entity::Entity::find()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::Discriminator.eq(owner.type_tag()))
            .filter(entity::Column::ParentId.eq(owner.id()))
            .one(&*self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::ActiveModel = model.into();
        if let Some(name) = patch.name {
            active.name = Set(Some(name));
        }
        if let Some(is_default) = patch.is_default {
            active.is_default = Set(is_default);
        }
        if let Some(street) = patch.street {
            active.street = Set(street);
        }
        if let Some(neighborhood) = patch.neighborhood {
            active.neighborhood = Set(neighborhood);
        }
        if let Some(city) = patch.city {
            active.city = Set(city);
        }
        if let Some(postcode) = patch.postcode {
            active.postcode = Set(postcode);
        }
        if let Some(state) = patch.state {
            active.state = Set(state);
        }
        if let Some(number) = patch.number {
            active.number = Set(Some(number));
        }
        if let Some(complement) = patch.complement {
            active.complement = Set(Some(complement));
        }
        if let Some(lat) = patch.lat {
            active.lat = Set(Some(lat));
        }
        if let Some(lng) = patch.lng {
            active.lng = Set(Some(lng));
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&*self.db).await?;
        into_address(model).map(Some)
    }

    async fn delete(&self, owner: OwnerRef, id: i64) -> Result<bool> {
        let result = entity::Entity::delete_many()
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::Discriminator.eq(owner.type_tag()))
            .filter(entity::Column::ParentId.eq(owner.id()))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    async fn delete_for_owner(&self, owner: OwnerRef) -> Result<u64> {
        let result = entity::Entity::delete_many()
            .filter(entity::Column::Discriminator.eq(owner.type_tag()))
            .filter(entity::Column::ParentId.eq(owner.id()))
            .exec(&*self.db)
            .await?;

        Ok(result.rows_affected)
    }

    async fn search(
        &self,
        owner: OwnerRef,
        filter_spec: Vec<FilterClause>,
        sort_spec: Vec<SortClause>,
        page: i64,
        items_per_page: i64,
        limits: &PageLimits,
    ) -> Result<Page<Address>, QueryError> {
        // Owner scoping is appended after the caller's clauses; both columns
        // participate so a same-numbered owner of another type never matches.
        let mut filter_spec = filter_spec;
        filter_spec.push(FilterClause::eq("discriminator", owner.type_tag()));
        filter_spec.push(FilterClause::eq("parent_id", owner.id()));

        let page = search_filter_sort_paginate(
            &*self.db,
            &SCHEMA,
            &filter_spec,
            &sort_spec,
            page,
            items_per_page,
            limits,
        )
        .await?;

        let mut items = Vec::with_capacity(page.items.len());
        for model in page.items {
            items.push(into_address(model).map_err(|e| QueryError::Db(e.to_string()))?);
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
