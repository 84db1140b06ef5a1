//! The page envelope.

use serde::Serialize;

/// One page of results plus pagination metadata.
///
/// The five field names are the wire contract of every paginated response.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub per_page: u64,
    pub num_pages: u64,
    pub page: u64,
    pub total: u64,
}

impl<T> Page<T> {
    /// Convert the item type while keeping the metadata (entity → DTO).
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            per_page: self.per_page,
            num_pages: self.num_pages,
            page: self.page,
            total: self.total,
        }
    }
}
