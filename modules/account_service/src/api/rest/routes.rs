//! Route registration for the account area.

use std::sync::Arc;

use axum::extract::{Form, Path, Query};
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use mercato_auth::AuthConfig;
use mercato_query::{PageLimits, PageQuery};

use super::dto::*;
use super::extract::{CurrentAccount, VerifiedAccount};
use super::handlers;
use crate::domain::Service;

/// Register all account REST routes.
///
/// The account and address services, the auth config, and the page limits
/// ride along as request extensions; the auth extractors pick them up from
/// there.
pub fn register_routes(
    router: Router,
    service: Arc<Service>,
    addresses: Arc<address_service::domain::Service>,
    auth_config: Arc<AuthConfig>,
    limits: Arc<PageLimits>,
) -> Router {
    router
        // Account endpoints
        .route(
            "/account/accounts",
            post(register_account_handler)
                .get(get_account_handler)
                .put(update_account_handler)
                .delete(delete_account_handler),
        )
        // Auth endpoints
        .route("/auth/token", post(login_handler))
        // Email verification endpoints
        .route(
            "/account/accounts/verify/{user_id}/{signature}",
            get(verify_email_handler),
        )
        .route("/account/accounts/verify", post(resend_verification_handler))
        // Password reset endpoints
        .route("/account/accounts/password", post(forgot_password_handler))
        .route(
            "/account/accounts/password/reset",
            post(reset_password_handler),
        )
        // Account address endpoints
        .route(
            "/account/accounts/addresses",
            post(create_address_handler).get(list_addresses_handler),
        )
        .route(
            "/account/accounts/addresses/{address_id}",
            get(get_address_handler)
                .put(update_address_handler)
                .delete(delete_address_handler),
        )
        // Services as extensions for handlers and extractors
        .layer(Extension(service))
        .layer(Extension(addresses))
        .layer(Extension(auth_config))
        .layer(Extension(limits))
}

// ===== Handler wrappers that extract services from Extensions =====

async fn register_account_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<RegisterAccountRequest>,
) -> Result<(axum::http::StatusCode, Json<AccountDto>), mercato_errors::Problem> {
    handlers::register_account(service, json).await
}

async fn get_account_handler(VerifiedAccount(account): VerifiedAccount) -> Json<AccountDto> {
    handlers::get_account(account).await
}

async fn update_account_handler(
    Extension(service): Extension<Arc<Service>>,
    VerifiedAccount(account): VerifiedAccount,
    json: Json<UpdateAccountRequest>,
) -> Result<Json<AccountDto>, mercato_errors::Problem> {
    handlers::update_account(service, account, json).await
}

async fn delete_account_handler(
    Extension(service): Extension<Arc<Service>>,
    VerifiedAccount(account): VerifiedAccount,
) -> Result<axum::http::StatusCode, mercato_errors::Problem> {
    handlers::delete_account(service, account).await
}

async fn login_handler(
    Extension(service): Extension<Arc<Service>>,
    Extension(auth_config): Extension<Arc<AuthConfig>>,
    form: Form<LoginRequest>,
) -> Result<Json<TokenDto>, mercato_errors::Problem> {
    handlers::login(service, auth_config, form).await
}

async fn verify_email_handler(
    Extension(service): Extension<Arc<Service>>,
    path: Path<(i64, String)>,
) -> Result<Json<AccountDto>, mercato_errors::Problem> {
    handlers::verify_email(service, path).await
}

async fn resend_verification_handler(
    Extension(service): Extension<Arc<Service>>,
    CurrentAccount(account): CurrentAccount,
) -> Result<axum::http::StatusCode, mercato_errors::Problem> {
    handlers::resend_verification(service, account).await
}

async fn forgot_password_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<PasswordForgotRequest>,
) -> Result<axum::http::StatusCode, mercato_errors::Problem> {
    handlers::forgot_password(service, json).await
}

async fn reset_password_handler(
    Extension(service): Extension<Arc<Service>>,
    json: Json<PasswordResetRequest>,
) -> Result<axum::http::StatusCode, mercato_errors::Problem> {
    handlers::reset_password(service, json).await
}

async fn create_address_handler(
    Extension(addresses): Extension<Arc<address_service::domain::Service>>,
    VerifiedAccount(account): VerifiedAccount,
    json: Json<AddressCreateDto>,
) -> Result<(axum::http::StatusCode, Json<AddressDto>), mercato_errors::Problem> {
    handlers::create_account_address(addresses, account, json).await
}

async fn list_addresses_handler(
    Extension(addresses): Extension<Arc<address_service::domain::Service>>,
    Extension(limits): Extension<Arc<PageLimits>>,
    VerifiedAccount(account): VerifiedAccount,
    query: Query<PageQuery>,
) -> Result<Json<AddressPageDto>, mercato_errors::Problem> {
    handlers::list_account_addresses(addresses, limits, account, query).await
}

async fn get_address_handler(
    Extension(addresses): Extension<Arc<address_service::domain::Service>>,
    VerifiedAccount(account): VerifiedAccount,
    path: Path<i64>,
) -> Result<Json<AddressDto>, mercato_errors::Problem> {
    handlers::get_account_address(addresses, account, path).await
}

async fn update_address_handler(
    Extension(addresses): Extension<Arc<address_service::domain::Service>>,
    VerifiedAccount(account): VerifiedAccount,
    path: Path<i64>,
    json: Json<AddressUpdateDto>,
) -> Result<Json<AddressDto>, mercato_errors::Problem> {
    handlers::update_account_address(addresses, account, path, json).await
}

async fn delete_address_handler(
    Extension(addresses): Extension<Arc<address_service::domain::Service>>,
    VerifiedAccount(account): VerifiedAccount,
    path: Path<i64>,
) -> Result<axum::http::StatusCode, mercato_errors::Problem> {
    handlers::delete_account_address(addresses, account, path).await
}
