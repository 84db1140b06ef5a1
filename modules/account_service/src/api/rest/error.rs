//! HTTP error mapping to RFC-9457 Problem Details.

use address_service::contract::AddressError;
use axum::http::StatusCode;
use mercato_errors::Problem;
use mercato_query::QueryError;

use crate::contract::AccountError;

/// Map account domain errors to HTTP Problem Details
pub fn map_account_error(error: AccountError) -> Problem {
    match error {
        AccountError::NotFound { .. } => Problem::not_found(),

        AccountError::Conflict { fields } => Problem::unique_conflict(fields),

        AccountError::InvalidCredentials => Problem::unauthorized("Incorrect email or password"),

        AccountError::EmailNotVerified => Problem::forbidden("Email not verified"),

        AccountError::InvalidSignature => Problem::forbidden("Invalid verification signature"),

        AccountError::InvalidResetToken => {
            Problem::bad_request("Invalid or expired password reset token")
        }

        AccountError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        AccountError::Internal => Problem::internal(),
    }
}

/// Map address domain errors to HTTP Problem Details
pub fn map_address_error(error: AddressError) -> Problem {
    match error {
        AddressError::NotFound { .. } => Problem::not_found(),
        AddressError::Query(err) => map_query_error(err),
        AddressError::Internal => Problem::internal(),
    }
}

/// Map query engine errors to HTTP Problem Details
pub fn map_query_error(error: QueryError) -> Problem {
    match error {
        QueryError::BadFilterFormat(_)
        | QueryError::BadSortFormat(_)
        | QueryError::FieldNotFound { .. }
        | QueryError::InvalidPage(_)
        | QueryError::BadSpec(_) => Problem::bad_request(error.to_string()),
        QueryError::Db(_) => Problem::internal(),
    }
}
