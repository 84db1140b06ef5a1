//! Dynamic filter/sort/paginate query engine.
//!
//! List endpoints accept declarative JSON specs (`filter` and `sort` query
//! parameters) plus `page`/`items_per_page`, and answer with a page envelope
//! carrying exactly five keys: `items`, `per_page`, `num_pages`, `page`,
//! `total`.
//!
//! The engine never inspects entities reflectively. Each module registers an
//! [`EntitySchema`] once at startup: a mapping from API field names to typed
//! sea-orm columns. Clause interpretation is fail-fast; the first invalid
//! clause aborts the whole request and nothing is partially applied.

pub mod error;
pub mod fields;
pub mod filter;
pub mod page;
pub mod pagination;
pub mod service;
pub mod sort;
pub mod spec;

pub use error::QueryError;
pub use fields::{EntitySchema, FieldKind, FieldMap};
pub use filter::apply_filters;
pub use page::Page;
pub use pagination::{apply_pagination, PageInfo, PageLimits};
pub use service::search_filter_sort_paginate;
pub use sort::apply_sort;
pub use spec::{
    parse_filter_spec, parse_sort_spec, FilterClause, FilterOp, PageQuery, SortClause, SortDir,
};

#[cfg(test)]
mod tests;
