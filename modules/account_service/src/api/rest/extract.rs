//! Authentication extractors.
//!
//! The dependency chain mirrors the auth requirements of the routes:
//! [`CurrentAccount`] needs a valid bearer token resolving to an existing
//! account, [`VerifiedAccount`] additionally needs a verified email, and
//! [`AdminAccount`] an admin flag on top of that.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::{header::AUTHORIZATION, request::Parts};
use mercato_auth::{bearer_token, decode_subject, AuthConfig};
use mercato_errors::Problem;

use crate::contract::Account;
use crate::domain::Service;

const CREDENTIALS_DETAIL: &str = "Could not validate credentials";

/// The account behind the request's bearer token.
pub struct CurrentAccount(pub Account);

/// A current account with a verified email address.
pub struct VerifiedAccount(pub Account);

/// A verified account with admin privileges.
pub struct AdminAccount(pub Account);

async fn resolve_account(parts: &mut Parts) -> Result<Account, Problem> {
    let auth_config = parts
        .extensions
        .get::<Arc<AuthConfig>>()
        .cloned()
        .ok_or_else(Problem::internal)?;
    let service = parts
        .extensions
        .get::<Arc<Service>>()
        .cloned()
        .ok_or_else(Problem::internal)?;

    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| Problem::unauthorized(CREDENTIALS_DETAIL))?;
    let token =
        bearer_token(header).ok_or_else(|| Problem::unauthorized(CREDENTIALS_DETAIL))?;

    let email = decode_subject(token, &auth_config)
        .map_err(|_| Problem::unauthorized(CREDENTIALS_DETAIL))?;

    service
        .get_by_email(&email)
        .await
        .map_err(|_| Problem::internal())?
        .ok_or_else(|| Problem::unauthorized(CREDENTIALS_DETAIL))
}

impl<S: Send + Sync> FromRequestParts<S> for CurrentAccount {
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(resolve_account(parts).await?))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for VerifiedAccount {
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let account = resolve_account(parts).await?;
        if !account.is_verified() {
            return Err(Problem::forbidden("Email not verified"));
        }
        Ok(Self(account))
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AdminAccount {
    type Rejection = Problem;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let account = resolve_account(parts).await?;
        if !account.is_verified() {
            return Err(Problem::forbidden("Email not verified"));
        }
        if !account.is_admin {
            return Err(Problem::forbidden("Forbidden"));
        }
        Ok(Self(account))
    }
}
