//! Search-filter-sort-paginate orchestrator.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait};
use tracing::instrument;

use crate::error::QueryError;
use crate::fields::EntitySchema;
use crate::filter::apply_filters;
use crate::page::Page;
use crate::pagination::{apply_pagination, PageLimits};
use crate::sort::apply_sort;
use crate::spec::{FilterClause, SortClause};

/// Common functionality for searching, filtering, sorting, and pagination.
///
/// Builds the base query for the schema's entity, narrows it with the filter
/// spec, orders it with the sort spec, bounds it to the requested page, and
/// executes both the count and the data query on the given connection.
///
/// `items_per_page` of `-1` means unbounded; values above the configured
/// maximum are silently capped. Any interpreter failure propagates unmodified
/// and no partial page is returned.
///
/// # Errors
/// Everything the interpreters and the calculator raise, plus `Db` for
/// execution failures.
#[instrument(skip_all, fields(entity = schema.name(), page, items_per_page))]
pub async fn search_filter_sort_paginate<E, C>(
    conn: &C,
    schema: &EntitySchema<E>,
    filter_spec: &[FilterClause],
    sort_spec: &[SortClause],
    page: i64,
    items_per_page: i64,
    limits: &PageLimits,
) -> Result<Page<E::Model>, QueryError>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    E::Column: ColumnTrait + Copy,
    C: ConnectionTrait,
{
    let mut select = E::find();

    if !filter_spec.is_empty() {
        select = apply_filters(select, filter_spec, schema)?;
    }

    if !sort_spec.is_empty() {
        select = apply_sort(select, sort_spec, schema)?;
    }

    let page_size = if items_per_page == -1 {
        None
    } else if items_per_page > limits.max_items_per_page {
        Some(limits.max_items_per_page)
    } else {
        Some(items_per_page)
    };

    let (select, info) = apply_pagination(select, conn, Some(page), page_size).await?;

    let items = select.all(conn).await?;

    Ok(Page {
        items,
        per_page: info.page_size,
        num_pages: info.num_pages,
        page: info.page_number,
        total: info.total,
    })
}
