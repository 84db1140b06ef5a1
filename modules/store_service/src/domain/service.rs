//! Domain service - marketplace business logic and authorization.

use std::sync::Arc;

use account_service::contract::Account;
use address_service::contract::{Address, AddressPatch, NewAddress, OwnerRef};
use mercato_query::{FilterClause, Page, PageLimits, SortClause};
use tracing::{info, instrument};

use crate::contract::{
    NewSegment, NewStore, Segment, SegmentPatch, Store, StoreError, StorePatch,
};
use crate::domain::repository::{SegmentsRepository, StoreUniqueProbe, StoresRepository};

/// Domain service for the marketplace
pub struct Service {
    segments: Arc<dyn SegmentsRepository>,
    stores: Arc<dyn StoresRepository>,
    addresses: Arc<address_service::domain::Service>,
}

impl Service {
    pub fn new(
        segments: Arc<dyn SegmentsRepository>,
        stores: Arc<dyn StoresRepository>,
        addresses: Arc<address_service::domain::Service>,
    ) -> Self {
        Self {
            segments,
            stores,
            addresses,
        }
    }

    // ===== Segment operations =====

    /// Create a segment; the title must not already exist.
    #[instrument(skip_all, fields(title = %segment.title))]
    pub async fn create_segment(&self, segment: NewSegment) -> Result<Segment, StoreError> {
        if self.segments.title_exists(&segment.title, None).await? {
            return Err(StoreError::Conflict {
                fields: vec!["title".to_owned()],
            });
        }

        let segment = self.segments.create(segment).await?;
        info!(segment_id = segment.id, "segment created");
        Ok(segment)
    }

    pub async fn get_segment(&self, id: i64) -> Result<Segment, StoreError> {
        self.segments
            .find(id)
            .await?
            .ok_or_else(|| StoreError::segment_not_found(id))
    }

    #[instrument(skip_all, fields(segment_id = id))]
    pub async fn update_segment(
        &self,
        id: i64,
        patch: SegmentPatch,
    ) -> Result<Segment, StoreError> {
        if let Some(title) = &patch.title {
            if self.segments.title_exists(title, Some(id)).await? {
                return Err(StoreError::Conflict {
                    fields: vec!["title".to_owned()],
                });
            }
        }

        self.segments
            .update(id, patch)
            .await?
            .ok_or_else(|| StoreError::segment_not_found(id))
    }

    #[instrument(skip_all, fields(segment_id = id))]
    pub async fn delete_segment(&self, id: i64) -> Result<(), StoreError> {
        if !self.segments.delete(id).await? {
            return Err(StoreError::segment_not_found(id));
        }
        info!("segment deleted");
        Ok(())
    }

    pub async fn search_segments(
        &self,
        filter_spec: Vec<FilterClause>,
        sort_spec: Vec<SortClause>,
        page: i64,
        items_per_page: i64,
        limits: &PageLimits,
    ) -> Result<Page<Segment>, StoreError> {
        let page = self
            .segments
            .search(filter_spec, sort_spec, page, items_per_page, limits)
            .await?;
        Ok(page)
    }

    // ===== Store operations =====

    /// Create a store; the creating user becomes its owner.
    #[instrument(skip_all, fields(title = %store.title, owner_user_id = owner.id))]
    pub async fn create_store(
        &self,
        owner: &Account,
        store: NewStore,
    ) -> Result<Store, StoreError> {
        let probe = StoreUniqueProbe {
            title: Some(store.title.clone()),
            legal: Some(store.legal.clone()),
            document_number: Some(store.document_number.clone()),
        };
        let conflicts = self.stores.conflicting_fields(&probe, None).await?;
        if !conflicts.is_empty() {
            return Err(StoreError::Conflict { fields: conflicts });
        }

        // The segment must resolve before the row is written
        if self.segments.find(store.segment_id).await?.is_none() {
            return Err(StoreError::Validation {
                message: format!("segment {} does not exist", store.segment_id),
            });
        }

        let addresses = store.addresses.clone();
        let created = self.stores.create(store, owner.id).await?;

        for address in addresses {
            self.addresses
                .create(created.owner_ref(), address)
                .await
                .map_err(|_| StoreError::Internal)?;
        }

        info!(store_id = created.id, "store created");
        Ok(created)
    }

    pub async fn get_store(&self, id: i64) -> Result<Store, StoreError> {
        self.stores
            .find(id)
            .await?
            .ok_or_else(|| StoreError::store_not_found(id))
    }

    #[instrument(skip_all, fields(store_id = id, user_id = actor.id))]
    pub async fn update_store(
        &self,
        actor: &Account,
        id: i64,
        patch: StorePatch,
    ) -> Result<Store, StoreError> {
        let store = self.get_store(id).await?;
        self.ensure_store_owner_or_admin(actor, store.id).await?;

        let probe = StoreUniqueProbe {
            title: patch.title.clone(),
            legal: patch.legal.clone(),
            document_number: patch.document_number.clone(),
        };
        let conflicts = self.stores.conflicting_fields(&probe, Some(id)).await?;
        if !conflicts.is_empty() {
            return Err(StoreError::Conflict { fields: conflicts });
        }

        self.stores
            .update(id, patch)
            .await?
            .ok_or_else(|| StoreError::store_not_found(id))
    }

    /// Delete the store, its membership rows, and its addresses.
    #[instrument(skip_all, fields(store_id = id, user_id = actor.id))]
    pub async fn delete_store(&self, actor: &Account, id: i64) -> Result<(), StoreError> {
        let store = self.get_store(id).await?;
        self.ensure_store_owner_or_admin(actor, store.id).await?;

        if !self.stores.delete(id).await? {
            return Err(StoreError::store_not_found(id));
        }

        self.addresses
            .delete_for_owner(store.owner_ref())
            .await
            .map_err(|_| StoreError::Internal)?;

        info!("store deleted");
        Ok(())
    }

    pub async fn search_stores(
        &self,
        filter_spec: Vec<FilterClause>,
        sort_spec: Vec<SortClause>,
        page: i64,
        items_per_page: i64,
        limits: &PageLimits,
    ) -> Result<Page<Store>, StoreError> {
        let page = self
            .stores
            .search(filter_spec, sort_spec, page, items_per_page, limits)
            .await?;
        Ok(page)
    }

    /// Owner-or-admin gate for store mutations.
    pub async fn ensure_store_owner_or_admin(
        &self,
        actor: &Account,
        store_id: i64,
    ) -> Result<(), StoreError> {
        if actor.is_admin {
            return Ok(());
        }
        if self.stores.is_owner(store_id, actor.id).await? {
            return Ok(());
        }
        Err(StoreError::Forbidden)
    }

    // ===== Store address operations =====

    #[instrument(skip_all, fields(store_id, user_id = actor.id))]
    pub async fn create_store_address(
        &self,
        actor: &Account,
        store_id: i64,
        address: NewAddress,
    ) -> Result<Address, StoreError> {
        let store = self.get_store(store_id).await?;
        self.ensure_store_owner_or_admin(actor, store.id).await?;

        self.addresses
            .create(store.owner_ref(), address)
            .await
            .map_err(|_| StoreError::Internal)
    }

    pub async fn list_store_addresses(
        &self,
        store_id: i64,
        filter_spec: Vec<FilterClause>,
        sort_spec: Vec<SortClause>,
        page: i64,
        items_per_page: i64,
        limits: &PageLimits,
    ) -> Result<Page<Address>, StoreError> {
        let store = self.get_store(store_id).await?;
        self.addresses
            .search(
                store.owner_ref(),
                filter_spec,
                sort_spec,
                page,
                items_per_page,
                limits,
            )
            .await
            .map_err(map_address_error)
    }

    pub async fn get_store_address(
        &self,
        store_id: i64,
        address_id: i64,
    ) -> Result<Address, StoreError> {
        let store = self.get_store(store_id).await?;
        self.addresses
            .get(store.owner_ref(), address_id)
            .await
            .map_err(map_address_error)
    }

    #[instrument(skip_all, fields(store_id, address_id, user_id = actor.id))]
    pub async fn update_store_address(
        &self,
        actor: &Account,
        store_id: i64,
        address_id: i64,
        patch: AddressPatch,
    ) -> Result<Address, StoreError> {
        let store = self.get_store(store_id).await?;
        self.ensure_store_owner_or_admin(actor, store.id).await?;

        self.addresses
            .update(store.owner_ref(), address_id, patch)
            .await
            .map_err(map_address_error)
    }

    #[instrument(skip_all, fields(store_id, address_id, user_id = actor.id))]
    pub async fn delete_store_address(
        &self,
        actor: &Account,
        store_id: i64,
        address_id: i64,
    ) -> Result<(), StoreError> {
        let store = self.get_store(store_id).await?;
        self.ensure_store_owner_or_admin(actor, store.id).await?;

        self.addresses
            .delete(store.owner_ref(), address_id)
            .await
            .map_err(map_address_error)
    }
}

fn map_address_error(err: address_service::contract::AddressError) -> StoreError {
    use address_service::contract::AddressError;
    match err {
        AddressError::NotFound { id } => StoreError::NotFound {
            resource: "address".to_owned(),
            id,
        },
        AddressError::Query(err) => StoreError::Query(err),
        AddressError::Internal => StoreError::Internal,
    }
}
