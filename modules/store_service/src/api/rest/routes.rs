//! Route registration for the store area.

use std::sync::Arc;

use account_service::api::rest::{AdminAccount, VerifiedAccount};
use axum::extract::{Path, Query};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use mercato_auth::AuthConfig;
use mercato_query::{PageLimits, PageQuery};

use super::dto::*;
use super::handlers;
use crate::domain::Service;

/// Register all store REST routes.
///
/// The auth extractors resolve through the account service, so it rides
/// along as an extension next to this module's own service.
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    accounts: Arc<account_service::domain::Service>,
    auth_config: Arc<AuthConfig>,
    limits: Arc<PageLimits>,
) -> Router {
    router
        // Segment endpoints
        .route(
            "/store/segments",
            post(create_segment_handler).get(list_segments_handler),
        )
        .route(
            "/store/segments/{segment_id}",
            get(get_segment_handler)
                .put(update_segment_handler)
                .delete(delete_segment_handler),
        )
        // Store endpoints
        .route(
            "/store/stores",
            post(create_store_handler).get(list_stores_handler),
        )
        .route(
            "/store/stores/{store_id}",
            get(get_store_handler)
                .put(update_store_handler)
                .delete(delete_store_handler),
        )
        // Store address endpoints
        .route(
            "/store/stores/{store_id}/addresses",
            post(create_store_address_handler).get(list_store_addresses_handler),
        )
        .route(
            "/store/stores/{store_id}/addresses/{address_id}",
            get(get_store_address_handler)
                .put(update_store_address_handler)
                .delete(delete_store_address_handler),
        )
        // Services as extensions for handlers and extractors
        .layer(Extension(service))
        .layer(Extension(accounts))
        .layer(Extension(auth_config))
        .layer(Extension(limits))
}

// ===== Handler wrappers that extract services from Extensions =====

async fn create_segment_handler(
    Extension(service): Extension<Arc<Service>>,
    AdminAccount(_account): AdminAccount,
    json: Json<SegmentCreateRequest>,
) -> Result<(axum::http::StatusCode, Json<SegmentDto>), mercato_errors::Problem> {
    handlers::create_segment(service, json).await
}

async fn list_segments_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(limits): Extension<Arc<PageLimits>>,
    query: Query<PageQuery>,
) -> Result<Json<SegmentPageDto>, mercato_errors::Problem> {
    handlers::list_segments(service, limits, query).await
}

async fn get_segment_handler(
    Extension(service): Extension<Arc<Service>>,
    VerifiedAccount(_account): VerifiedAccount,
    path: Path<i64>,
) -> Result<Json<SegmentDto>, mercato_errors::Problem> {
    handlers::get_segment(service, path).await
}

async fn update_segment_handler(
    Extension(service): Extension<Arc<Service>>,
    AdminAccount(_account): AdminAccount,
    path: Path<i64>,
    json: Json<SegmentUpdateRequest>,
) -> Result<Json<SegmentDto>, mercato_errors::Problem> {
    handlers::update_segment(service, path, json).await
}

async fn delete_segment_handler(
    Extension(service): Extension<Arc<Service>>,
    AdminAccount(_account): AdminAccount,
    path: Path<i64>,
) -> Result<axum::http::StatusCode, mercato_errors::Problem> {
    handlers::delete_segment(service, path).await
}

async fn create_store_handler(
    Extension(service): Extension<Arc<Service>>,
    VerifiedAccount(account): VerifiedAccount,
    json: Json<StoreCreateRequest>,
) -> Result<(axum::http::StatusCode, Json<StoreDto>), mercato_errors::Problem> {
    handlers::create_store(service, account, json).await
}

async fn list_stores_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(limits): Extension<Arc<PageLimits>>,
    query: Query<PageQuery>,
) -> Result<Json<StorePageDto>, mercato_errors::Problem> {
    handlers::list_stores(service, limits, query).await
}

async fn get_store_handler(
    Extension(service): Extension<Arc<Service>>,
    VerifiedAccount(_account): VerifiedAccount,
    path: Path<i64>,
) -> Result<Json<StoreDto>, mercato_errors::Problem> {
    handlers::get_store(service, path).await
}

async fn update_store_handler(
    Extension(service): Extension<Arc<Service>>,
    VerifiedAccount(account): VerifiedAccount,
    path: Path<i64>,
    json: Json<StoreUpdateRequest>,
) -> Result<Json<StoreDto>, mercato_errors::Problem> {
    handlers::update_store(service, account, path, json).await
}

async fn delete_store_handler(
    Extension(service): Extension<Arc<Service>>,
    VerifiedAccount(account): VerifiedAccount,
    path: Path<i64>,
) -> Result<axum::http::StatusCode, mercato_errors::Problem> {
    handlers::delete_store(service, account, path).await
}

async fn create_store_address_handler(
    Extension(service): Extension<Arc<Service>>,
    VerifiedAccount(account): VerifiedAccount,
    path: Path<i64>,
    json: Json<AddressCreateDto>,
) -> Result<(axum::http::StatusCode, Json<AddressDto>), mercato_errors::Problem> {
    handlers::create_store_address(service, account, path, json).await
}

async fn list_store_addresses_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(limits): Extension<Arc<PageLimits>>,
    VerifiedAccount(_account): VerifiedAccount,
    path: Path<i64>,
    query: Query<PageQuery>,
) -> Result<Json<AddressPageDto>, mercato_errors::Problem> {
    handlers::list_store_addresses(service, limits, path, query).await
}

async fn get_store_address_handler(
    Extension(service): Extension<Arc<Service>>,
    VerifiedAccount(_account): VerifiedAccount,
    path: Path<(i64, i64)>,
) -> Result<Json<AddressDto>, mercato_errors::Problem> {
    handlers::get_store_address(service, path).await
}

async fn update_store_address_handler(
    Extension(service): Extension<Arc<Service>>,
    VerifiedAccount(account): VerifiedAccount,
    path: Path<(i64, i64)>,
    json: Json<AddressUpdateDto>,
) -> Result<Json<AddressDto>, mercato_errors::Problem> {
    handlers::update_store_address(service, account, path, json).await
}

async fn delete_store_address_handler(
    Extension(service): Extension<Arc<Service>>,
    VerifiedAccount(account): VerifiedAccount,
    path: Path<(i64, i64)>,
) -> Result<axum::http::StatusCode, mercato_errors::Problem> {
    handlers::delete_store_address(service, account, path).await
}
