//! HTTP error mapping to RFC-9457 Problem Details.

use axum::http::StatusCode;
use mercato_errors::Problem;
use mercato_query::QueryError;

use crate::contract::StoreError;

/// Map store domain errors to HTTP Problem Details
pub fn map_store_error(error: StoreError) -> Problem {
    match error {
        StoreError::NotFound { .. } => Problem::not_found(),

        StoreError::Conflict { fields } => Problem::unique_conflict(fields),

        StoreError::Forbidden => Problem::forbidden("Forbidden"),

        StoreError::Validation { message } => {
            Problem::new(StatusCode::BAD_REQUEST, "Validation Error").with_detail(message)
        }

        StoreError::Query(err) => map_query_error(err),

        StoreError::Internal => Problem::internal(),
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
