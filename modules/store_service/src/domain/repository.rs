//! Repository traits for marketplace persistence.

use async_trait::async_trait;
use mercato_query::{FilterClause, Page, PageLimits, QueryError, SortClause};

use crate::contract::{
    NewSegment, NewStore, Segment, SegmentPatch, Store, StoreError, StorePatch,
};

/// The to-be-unique fields of a store, probed before writes.
#[derive(Debug, Clone, Default)]
pub struct StoreUniqueProbe {
    pub title: Option<String>,
    pub legal: Option<String>,
    pub document_number: Option<String>,
}

/// Repository for segment rows.
#[async_trait]
pub trait SegmentsRepository: Send + Sync {
    async fn create(&self, segment: NewSegment) -> Result<Segment, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<Segment>, StoreError>;

    /// Whether another segment already carries this title.
    async fn title_exists(&self, title: &str, exclude_id: Option<i64>)
        -> Result<bool, StoreError>;

    async fn update(&self, id: i64, patch: SegmentPatch) -> Result<Option<Segment>, StoreError>;

    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    async fn search(
        &self,
        filter_spec: Vec<FilterClause>,
        sort_spec: Vec<SortClause>,
        page: i64,
        items_per_page: i64,
        limits: &PageLimits,
    ) -> Result<Page<Segment>, QueryError>;
}

/// Repository for store and membership rows.
#[async_trait]
pub trait StoresRepository: Send + Sync {
    /// Insert a store together with its owner membership row.
    async fn create(&self, store: NewStore, owner_user_id: i64) -> Result<Store, StoreError>;

    async fn find(&self, id: i64) -> Result<Option<Store>, StoreError>;

    /// Advisory uniqueness pre-check: the names of every probed field whose
    /// value already exists on another store.
    async fn conflicting_fields(
        &self,
        probe: &StoreUniqueProbe,
        exclude_id: Option<i64>,
    ) -> Result<Vec<String>, StoreError>;

    async fn update(&self, id: i64, patch: StorePatch) -> Result<Option<Store>, StoreError>;

    /// Delete the store; membership rows go with it.
    async fn delete(&self, id: i64) -> Result<bool, StoreError>;

    /// Whether the user holds an active owner membership of the store.
    async fn is_owner(&self, store_id: i64, user_id: i64) -> Result<bool, StoreError>;

    async fn search(
        &self,
        filter_spec: Vec<FilterClause>,
        sort_spec: Vec<SortClause>,
        page: i64,
        items_per_page: i64,
        limits: &PageLimits,
    ) -> Result<Page<Store>, QueryError>;
}
