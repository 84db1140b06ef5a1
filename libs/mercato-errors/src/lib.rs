//! HTTP error payloads shared by every REST area.
//!
//! All failure responses are RFC-9457 Problem Details. Uniqueness conflicts
//! additionally carry an `errors` array enumerating every conflicting field,
//! so a client can correct several fields in one round trip.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// RFC-9457 Problem Details for HTTP API errors
#[derive(Debug, Serialize, ToSchema)]
pub struct Problem {
    /// A URI reference that identifies the problem type
    #[serde(rename = "type")]
    pub type_uri: String,

    /// A short, human-readable summary of the problem type
    pub title: String,

    /// The HTTP status code
    pub status: u16,

    /// A human-readable explanation specific to this occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,

    /// A URI reference that identifies the specific occurrence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,

    /// Per-field violations (uniqueness conflicts, validation errors)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldViolation>,
}

/// A single field-level violation inside a Problem response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldViolation {
    /// Field name as it appears in the request body
    pub field: String,
    /// Violation message ("already exists", "is required", ...)
    pub message: String,
}

impl FieldViolation {
    pub fn already_exists(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: "already exists".to_owned(),
        }
    }
}

impl Problem {
    /// Create a new Problem Details response
    pub fn new(status: StatusCode, title: impl Into<String>) -> Self {
        Self {
            type_uri: format!("https://httpstatuses.io/{}", status.as_u16()),
            title: title.into(),
            status: status.as_u16(),
            detail: None,
            instance: None,
            errors: Vec::new(),
        }
    }

    /// Add detail message
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Add instance URI
    #[must_use]
    pub fn with_instance(mut self, instance: impl Into<String>) -> Self {
        self.instance = Some(instance.into());
        self
    }

    /// Attach field-level violations
    #[must_use]
    pub fn with_errors(mut self, errors: Vec<FieldViolation>) -> Self {
        self.errors = errors;
        self
    }

    /// 404 with the conventional "Not Found." detail
    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found").with_detail("Not Found.")
    }

    /// 422 enumerating every field that failed a uniqueness check
    pub fn unique_conflict(fields: impl IntoIterator<Item = String>) -> Self {
        Self::new(StatusCode::UNPROCESSABLE_ENTITY, "Unprocessable Entity").with_errors(
            fields
                .into_iter()
                .map(FieldViolation::already_exists)
                .collect(),
        )
    }

    /// 400 for malformed query/filter/sort/pagination input
    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Bad Request").with_detail(detail)
    }

    /// 401 with the WWW-Authenticate contract handled at the response level
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "Unauthorized").with_detail(detail)
    }

    /// 403 Forbidden
    pub fn forbidden(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, "Forbidden").with_detail(detail)
    }

    /// 500 with no internal detail leaked
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status == StatusCode::UNAUTHORIZED {
            let mut response = (status, Json(self)).into_response();
            response.headers_mut().insert(
                axum::http::header::WWW_AUTHENTICATE,
                axum::http::HeaderValue::from_static("Bearer"),
            );
            return response;
        }
        (status, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_conflict_lists_every_field() {
        let problem = Problem::unique_conflict(vec!["email".to_owned(), "nickname".to_owned()]);
        assert_eq!(problem.status, 422);
        assert_eq!(problem.errors.len(), 2);
        assert_eq!(problem.errors[0].field, "email");
        assert_eq!(problem.errors[0].message, "already exists");
        assert_eq!(problem.errors[1].field, "nickname");
    }

    #[test]
    fn serializes_without_empty_optionals() {
        let problem = Problem::not_found();
        let json = serde_json::to_value(&problem).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["detail"], "Not Found.");
        assert!(json.get("instance").is_none());
        assert!(json.get("errors").is_none());
    }
}
