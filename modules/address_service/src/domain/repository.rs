//! Repository trait for address persistence.
//!
//! Every operation takes the owner; implementations must scope each query by
//! both the address id and the `(discriminator, parent_id)` pair.

use anyhow::Result;
use async_trait::async_trait;
use mercato_query::{FilterClause, Page, PageLimits, QueryError, SortClause};

use crate::contract::{Address, AddressPatch, NewAddress, OwnerRef};

#[async_trait]
pub trait AddressesRepository: Send + Sync {
    /// Create an address under the owner. The stored discriminator/parent_id
    /// pair is derived from the owner, never from the payload.
    async fn create(&self, owner: OwnerRef, address: NewAddress) -> Result<Address>;

    /// Find an address by id under the owner.
    async fn find(&self, owner: OwnerRef, id: i64) -> Result<Option<Address>>;

    /// Apply a partial update; `None` when the id/owner pair does not resolve.
    async fn update(&self, owner: OwnerRef, id: i64, patch: AddressPatch)
        -> Result<Option<Address>>;

    /// Delete one address; `false` when the id/owner pair does not resolve.
    async fn delete(&self, owner: OwnerRef, id: i64) -> Result<bool>;

    /// Delete every address of the owner (cascade on owner deletion).
    async fn delete_for_owner(&self, owner: OwnerRef) -> Result<u64>;

    /// List the owner's addresses through the query engine. The owner scope
    /// is appended server-side to whatever spec the caller supplied.
    async fn search(
        &self,
        owner: OwnerRef,
        filter_spec: Vec<FilterClause>,
        sort_spec: Vec<SortClause>,
        page: i64,
        items_per_page: i64,
        limits: &PageLimits,
    ) -> Result<Page<Address>, QueryError>;
}
