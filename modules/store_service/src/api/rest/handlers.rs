//! HTTP request handlers - thin layer that delegates to the domain service.

use std::sync::Arc;

use account_service::contract::Account;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use mercato_errors::Problem;
use mercato_query::{PageLimits, PageQuery};
use tracing::info;

use super::dto::*;
use super::error::{map_query_error, map_store_error};
use crate::domain::Service;

fn page_args(
    query: &PageQuery,
    limits: &PageLimits,
) -> Result<
    (
        Vec<mercato_query::FilterClause>,
        Vec<mercato_query::SortClause>,
        i64,
        i64,
    ),
    Problem,
> {
    let filter_spec = query.filter_spec().map_err(map_query_error)?;
    let sort_spec = query.sort_spec().map_err(map_query_error)?;
    let page = query.page.unwrap_or(1);
    let items_per_page = query
        .items_per_page
        .unwrap_or(limits.default_items_per_page);
    Ok((filter_spec, sort_spec, page, items_per_page))
}

// ===== Segment Handlers =====

/// Create a segment (admin only, enforced at the route)
pub async fn create_segment(
    service: Arc<Service>,
    Json(req): Json<SegmentCreateRequest>,
) -> Result<(StatusCode, Json<SegmentDto>), Problem> {
    info!(title = %req.title, "starting segment creation");

    let segment = service
        .create_segment(req.into())
        .await
        .map_err(map_store_error)?;

    Ok((StatusCode::CREATED, Json(segment.into())))
}

/// List segments
pub async fn list_segments(
    service: Arc<Service>,
    limits: Arc<PageLimits>,
    Query(query): Query<PageQuery>,
) -> Result<Json<SegmentPageDto>, Problem> {
    let (filter_spec, sort_spec, page, items_per_page) = page_args(&query, &limits)?;

    let result = service
        .search_segments(filter_spec, sort_spec, page, items_per_page, &limits)
        .await
        .map_err(map_store_error)?;

    Ok(Json(result.into()))
}

/// Get a segment
pub async fn get_segment(
    service: Arc<Service>,
    Path(segment_id): Path<i64>,
) -> Result<Json<SegmentDto>, Problem> {
    let segment = service
        .get_segment(segment_id)
        .await
        .map_err(map_store_error)?;

    Ok(Json(segment.into()))
}

/// Update a segment (admin only, enforced at the route)
pub async fn update_segment(
    service: Arc<Service>,
    Path(segment_id): Path<i64>,
    Json(req): Json<SegmentUpdateRequest>,
) -> Result<Json<SegmentDto>, Problem> {
    let segment = service
        .update_segment(segment_id, req.into())
        .await
        .map_err(map_store_error)?;

    Ok(Json(segment.into()))
}

/// Delete a segment (admin only, enforced at the route)
pub async fn delete_segment(
    service: Arc<Service>,
    Path(segment_id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_segment(segment_id)
        .await
        .map_err(map_store_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Store Handlers =====

/// Create a store; the authenticated user becomes the owner
pub async fn create_store(
    service: Arc<Service>,
    account: Account,
    Json(req): Json<StoreCreateRequest>,
) -> Result<(StatusCode, Json<StoreDto>), Problem> {
    info!(title = %req.title, user_id = account.id, "starting store creation");

    let new_store = req.try_into().map_err(map_store_error)?;
    let store = service
        .create_store(&account, new_store)
        .await
        .map_err(map_store_error)?;

    Ok((StatusCode::CREATED, Json(store.into())))
}

/// List stores
pub async fn list_stores(
    service: Arc<Service>,
    limits: Arc<PageLimits>,
    Query(query): Query<PageQuery>,
) -> Result<Json<StorePageDto>, Problem> {
    let (filter_spec, sort_spec, page, items_per_page) = page_args(&query, &limits)?;

    let result = service
        .search_stores(filter_spec, sort_spec, page, items_per_page, &limits)
        .await
        .map_err(map_store_error)?;

    Ok(Json(result.into()))
}

/// Get a store
pub async fn get_store(
    service: Arc<Service>,
    Path(store_id): Path<i64>,
) -> Result<Json<StoreDto>, Problem> {
    let store = service.get_store(store_id).await.map_err(map_store_error)?;
    Ok(Json(store.into()))
}

/// Update a store (owner or admin)
pub async fn update_store(
    service: Arc<Service>,
    account: Account,
    Path(store_id): Path<i64>,
    Json(req): Json<StoreUpdateRequest>,
) -> Result<Json<StoreDto>, Problem> {
    let patch = req.try_into().map_err(map_store_error)?;
    let store = service
        .update_store(&account, store_id, patch)
        .await
        .map_err(map_store_error)?;

    Ok(Json(store.into()))
}

/// Delete a store (owner or admin)
pub async fn delete_store(
    service: Arc<Service>,
    account: Account,
    Path(store_id): Path<i64>,
) -> Result<StatusCode, Problem> {
    service
        .delete_store(&account, store_id)
        .await
        .map_err(map_store_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Store Address Handlers =====

/// Create a store address (owner or admin)
pub async fn create_store_address(
    service: Arc<Service>,
    account: Account,
    Path(store_id): Path<i64>,
    Json(req): Json<AddressCreateDto>,
) -> Result<(StatusCode, Json<AddressDto>), Problem> {
    let address = service
        .create_store_address(&account, store_id, req.into())
        .await
        .map_err(map_store_error)?;

    info!(store_id, address_id = address.id, "store address created");
    Ok((StatusCode::CREATED, Json(address.into())))
}

/// List a store's addresses
pub async fn list_store_addresses(
    service: Arc<Service>,
    limits: Arc<PageLimits>,
    Path(store_id): Path<i64>,
    Query(query): Query<PageQuery>,
) -> Result<Json<AddressPageDto>, Problem> {
    let (filter_spec, sort_spec, page, items_per_page) = page_args(&query, &limits)?;

    let result = service
        .list_store_addresses(store_id, filter_spec, sort_spec, page, items_per_page, &limits)
        .await
        .map_err(map_store_error)?;

    Ok(Json(result.into()))
}

/// Get a store address
pub async fn get_store_address(
    service: Arc<Service>,
    Path((store_id, address_id)): Path<(i64, i64)>,
) -> Result<Json<AddressDto>, Problem> {
    let address = service
        .get_store_address(store_id, address_id)
        .await
        .map_err(map_store_error)?;

    Ok(Json(address.into()))
}

/// Update a store address (owner or admin)
pub async fn update_store_address(
    service: Arc<Service>,
    account: Account,
    Path((store_id, address_id)): Path<(i64, i64)>,
    Json(req): Json<AddressUpdateDto>,
) -> Result<Json<AddressDto>, Problem> {
    let address = service
        .update_store_address(&account, store_id, address_id, req.into())
        .await
        .map_err(map_store_error)?;

    Ok(Json(address.into()))
}

/// Delete a store address (owner or admin)
pub async fn delete_store_address(
    service: Arc<Service>,
    account: Account,
    Path((store_id, address_id)): Path<(i64, i64)>,
) -> Result<StatusCode, Problem> {
    service
        .delete_store_address(&account, store_id, address_id)
        .await
        .map_err(map_store_error)?;

    Ok(StatusCode::NO_CONTENT)
}
