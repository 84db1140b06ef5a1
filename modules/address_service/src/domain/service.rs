//! Domain service - owner-scoped address operations.

use std::sync::Arc;

use mercato_query::{FilterClause, Page, PageLimits, SortClause};
use tracing::{info, instrument};

use crate::contract::{Address, AddressError, AddressPatch, NewAddress, OwnerRef};
use crate::domain::repository::AddressesRepository;

/// Domain service for address management
pub struct Service {
    repo: Arc<dyn AddressesRepository>,
}

impl Service {
    pub fn new(repo: Arc<dyn AddressesRepository>) -> Self {
        Self { repo }
    }

    /// Create a new address under the owner.
    #[instrument(skip(self, address), fields(owner = %owner))]
    pub async fn create(
        &self,
        owner: OwnerRef,
        address: NewAddress,
    ) -> Result<Address, AddressError> {
        let address = self
            .repo
            .create(owner, address)
            .await
            .map_err(|_| AddressError::Internal)?;

        info!(address_id = address.id, "address created");
        Ok(address)
    }

    /// Get an address by id. An address belonging to a different owner
    /// reports not-found exactly like a missing id.
    #[instrument(skip(self), fields(owner = %owner, address_id = id))]
    pub async fn get(&self, owner: OwnerRef, id: i64) -> Result<Address, AddressError> {
        self.repo
            .find(owner, id)
            .await
            .map_err(|_| AddressError::Internal)?
            .ok_or(AddressError::NotFound { id })
    }

    /// Update an address under the owner.
    #[instrument(skip(self, patch), fields(owner = %owner, address_id = id))]
    pub async fn update(
        &self,
        owner: OwnerRef,
        id: i64,
        patch: AddressPatch,
    ) -> Result<Address, AddressError> {
        self.repo
            .update(owner, id, patch)
            .await
            .map_err(|_| AddressError::Internal)?
            .ok_or(AddressError::NotFound { id })
    }

    /// Delete an address under the owner.
    #[instrument(skip(self), fields(owner = %owner, address_id = id))]
    pub async fn delete(&self, owner: OwnerRef, id: i64) -> Result<(), AddressError> {
        let deleted = self
            .repo
            .delete(owner, id)
            .await
            .map_err(|_| AddressError::Internal)?;

        if !deleted {
            return Err(AddressError::NotFound { id });
        }
        info!(address_id = id, "address deleted");
        Ok(())
    }

    /// Delete every address of the owner. Called when the owner row itself
    /// is deleted.
    #[instrument(skip(self), fields(owner = %owner))]
    pub async fn delete_for_owner(&self, owner: OwnerRef) -> Result<u64, AddressError> {
        let deleted = self
            .repo
            .delete_for_owner(owner)
            .await
            .map_err(|_| AddressError::Internal)?;

        info!(deleted, "owner addresses cascade-deleted");
        Ok(deleted)
    }

    /// List the owner's addresses.
    #[instrument(skip(self, filter_spec, sort_spec, limits), fields(owner = %owner, page))]
    pub async fn search(
        &self,
        owner: OwnerRef,
        filter_spec: Vec<FilterClause>,
        sort_spec: Vec<SortClause>,
        page: i64,
        items_per_page: i64,
        limits: &PageLimits,
    ) -> Result<Page<Address>, AddressError> {
        let page = self
            .repo
            .search(owner, filter_spec, sort_spec, page, items_per_page, limits)
            .await?;
        Ok(page)
    }
}
