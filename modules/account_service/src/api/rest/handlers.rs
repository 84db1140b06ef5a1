//! HTTP request handlers - thin layer that delegates to domain services.

use std::sync::Arc;

use axum::extract::{Form, Path, Query};
use axum::http::StatusCode;
use axum::Json;
use mercato_auth::{issue_access_token, AuthConfig};
use mercato_errors::Problem;
use mercato_query::{PageLimits, PageQuery};
use tracing::info;

use super::dto::*;
use super::error::{map_account_error, map_address_error, map_query_error};
use crate::domain::Service;

// ===== Account Handlers =====

/// Create an account
pub async fn register_account(
    service: Arc<Service>,
    Json(req): Json<RegisterAccountRequest>,
) -> Result<(StatusCode, Json<AccountDto>), Problem> {
    info!(email = %req.email, "starting account registration");

    let account = service
        .register(req.into())
        .await
        .map_err(map_account_error)?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Get the authenticated account
pub async fn get_account(account: crate::contract::Account) -> Json<AccountDto> {
    Json(account.into())
}

/// Update the authenticated account
pub async fn update_account(
    service: Arc<Service>,
    account: crate::contract::Account,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<AccountDto>, Problem> {
    let updated = service
        .update(&account, req.into())
        .await
        .map_err(map_account_error)?;

    Ok(Json(updated.into()))
}

/// Delete the authenticated account
pub async fn delete_account(
    service: Arc<Service>,
    account: crate::contract::Account,
) -> Result<StatusCode, Problem> {
    service.delete(&account).await.map_err(map_account_error)?;
    Ok(StatusCode::NO_CONTENT)
}

// ===== Auth Handlers =====

/// Exchange credentials for a bearer token
pub async fn login(
    service: Arc<Service>,
    auth_config: Arc<AuthConfig>,
    Form(req): Form<LoginRequest>,
) -> Result<Json<TokenDto>, Problem> {
    let account = service
        .authenticate(&req.username, &req.password)
        .await
        .map_err(map_account_error)?;

    let token = issue_access_token(&account.email, &auth_config)
        .map_err(|_| Problem::internal())?;

    Ok(Json(token.into()))
}

// ===== Verification Handlers =====

/// Mark an email address as verified via its signed link
pub async fn verify_email(
    service: Arc<Service>,
    Path((user_id, signature)): Path<(i64, String)>,
) -> Result<Json<AccountDto>, Problem> {
    let account = service
        .verify_email(user_id, &signature)
        .await
        .map_err(map_account_error)?;

    Ok(Json(account.into()))
}

/// Re-send the verification email for the authenticated account
pub async fn resend_verification(
    service: Arc<Service>,
    account: crate::contract::Account,
) -> Result<StatusCode, Problem> {
    service
        .resend_verification_email(&account)
        .await
        .map_err(map_account_error)?;

    Ok(StatusCode::ACCEPTED)
}

// ===== Password Reset Handlers =====

/// Start a password reset; answers 202 whether or not the email exists
pub async fn forgot_password(
    service: Arc<Service>,
    Json(req): Json<PasswordForgotRequest>,
) -> Result<StatusCode, Problem> {
    service
        .request_password_reset(&req.email)
        .await
        .map_err(map_account_error)?;

    Ok(StatusCode::ACCEPTED)
}

/// Complete a password reset with a previously issued token
pub async fn reset_password(
    service: Arc<Service>,
    Json(req): Json<PasswordResetRequest>,
) -> Result<StatusCode, Problem> {
    service
        .reset_password(&req.email, &req.token, &req.password)
        .await
        .map_err(map_account_error)?;

    Ok(StatusCode::NO_CONTENT)
}

// ===== Account Address Handlers =====

/// Create an address under the authenticated account
pub async fn create_account_address(
    addresses: Arc<address_service::domain::Service>,
    account: crate::contract::Account,
    Json(req): Json<AddressCreateDto>,
) -> Result<(StatusCode, Json<AddressDto>), Problem> {
    let address = addresses
        .create(account.owner_ref(), req.into())
        .await
        .map_err(map_address_error)?;

    info!(user_id = account.id, address_id = address.id, "account address created");
    Ok((StatusCode::CREATED, Json(address.into())))
}

/// List the authenticated account's addresses
pub async fn list_account_addresses(
    addresses: Arc<address_service::domain::Service>,
    limits: Arc<PageLimits>,
    account: crate::contract::Account,
    Query(query): Query<PageQuery>,
) -> Result<Json<AddressPageDto>, Problem> {
    let filter_spec = query.filter_spec().map_err(map_query_error)?;
    let sort_spec = query.sort_spec().map_err(map_query_error)?;
    let page = query.page.unwrap_or(1);
    let items_per_page = query
        .items_per_page
        .unwrap_or(limits.default_items_per_page);

    let result = addresses
        .search(
            account.owner_ref(),
            filter_spec,
            sort_spec,
            page,
            items_per_page,
            &limits,
        )
        .await
        .map_err(map_address_error)?;

    Ok(Json(result.into()))
}

/// Get one of the authenticated account's addresses
pub async fn get_account_address(
    addresses: Arc<address_service::domain::Service>,
    account: crate::contract::Account,
    Path(address_id): Path<i64>,
) -> Result<Json<AddressDto>, Problem> {
    let address = addresses
        .get(account.owner_ref(), address_id)
        .await
        .map_err(map_address_error)?;

    Ok(Json(address.into()))
}

/// Update one of the authenticated account's addresses
pub async fn update_account_address(
    addresses: Arc<address_service::domain::Service>,
    account: crate::contract::Account,
    Path(address_id): Path<i64>,
    Json(req): Json<AddressUpdateDto>,
) -> Result<Json<AddressDto>, Problem> {
    let address = addresses
        .update(account.owner_ref(), address_id, req.into())
        .await
        .map_err(map_address_error)?;

    Ok(Json(address.into()))
}

/// Delete one of the authenticated account's addresses
pub async fn delete_account_address(
    addresses: Arc<address_service::domain::Service>,
    account: crate::contract::Account,
    Path(address_id): Path<i64>,
) -> Result<StatusCode, Problem> {
    addresses
        .delete(account.owner_ref(), address_id)
        .await
        .map_err(map_address_error)?;

    Ok(StatusCode::NO_CONTENT)
}
