//! Pagination calculator: offset/limit windows and page metadata.

use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, QuerySelect, Select};
use serde::Deserialize;

use crate::error::QueryError;

/// Page-size knobs, one section of the application config, injected into the
/// orchestrator at the call site.
#[derive(Debug, Clone, Deserialize)]
pub struct PageLimits {
    #[serde(default = "default_items_per_page")]
    pub default_items_per_page: i64,
    #[serde(default = "default_max_items_per_page")]
    pub max_items_per_page: i64,
}

fn default_items_per_page() -> i64 {
    5
}

fn default_max_items_per_page() -> i64 {
    100
}

impl Default for PageLimits {
    fn default() -> Self {
        Self {
            default_items_per_page: default_items_per_page(),
            max_items_per_page: default_max_items_per_page(),
        }
    }
}

/// Metadata computed alongside the bounded query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page_number: u64,
    pub page_size: u64,
    pub num_pages: u64,
    pub total: u64,
}

/// Bound a filtered query to one page and compute its metadata.
///
/// The total-row count runs against the query as passed in, before any
/// limit/offset: `total` always reflects the filter predicate, not the page.
/// The count and the page read are sequential on the same connection; under
/// concurrent writes the pair is only as consistent as the storage isolation
/// level makes it.
///
/// `page_size` of `None` means "everything in one page"; a value larger than
/// the total (when rows exist) is clamped down to it; `0` is legal and yields
/// zero pages.
///
/// # Errors
/// `InvalidPage` for a negative page size or a page number below 1; `Db` if
/// the count query fails.
pub async fn apply_pagination<E, C>(
    select: Select<E>,
    conn: &C,
    page_number: Option<i64>,
    page_size: Option<i64>,
) -> Result<(Select<E>, PageInfo), QueryError>
where
    E: EntityTrait,
    E::Model: Send + Sync,
    C: ConnectionTrait,
{
    let total = select.clone().count(conn).await?;

    // The limit uses the requested size; metadata and the offset stride use
    // the clamped size.
    let select = limit(select, page_size)?;

    let effective = match page_size {
        None => total,
        Some(size) => {
            let size = size.unsigned_abs();
            if size > total && total > 0 {
                total
            } else {
                size
            }
        }
    };

    let select = offset(select, page_number, effective)?;

    let num_pages = if effective == 0 {
        0
    } else {
        total.div_ceil(effective)
    };

    Ok((
        select,
        PageInfo {
            page_number: page_number.unwrap_or(1).unsigned_abs(),
            page_size: effective,
            num_pages,
            total,
        },
    ))
}

fn limit<E: EntityTrait>(
    select: Select<E>,
    page_size: Option<i64>,
) -> Result<Select<E>, QueryError> {
    match page_size {
        Some(size) if size < 0 => Err(QueryError::InvalidPage(format!(
            "page size should not be negative: {size}"
        ))),
        Some(size) => Ok(select.limit(size.unsigned_abs())),
        None => Ok(select),
    }
}

fn offset<E: EntityTrait>(
    select: Select<E>,
    page_number: Option<i64>,
    page_size: u64,
) -> Result<Select<E>, QueryError> {
    match page_number {
        Some(number) if number < 1 => Err(QueryError::InvalidPage(format!(
            "page number should be positive: {number}"
        ))),
        Some(number) => Ok(select.offset((number.unsigned_abs() - 1) * page_size)),
        None => Ok(select),
    }
}
