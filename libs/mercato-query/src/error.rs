//! Unified error type for spec interpretation and pagination.

/// Errors raised while interpreting filter/sort specs or paginating.
///
/// All variants are terminal: the engine performs no retries and no partial
/// application. Boundary layers map these onto client errors (`FieldNotFound`,
/// `BadFilterFormat`, `BadSortFormat`, `InvalidPage`, `BadSpec` → 4xx) except
/// `Db`, which is a 500.
#[derive(Debug, Clone, thiserror::Error)]
pub enum QueryError {
    /// Malformed or unsupported filter clause (unknown operator, wrong value
    /// shape, undecodable spec)
    #[error("bad filter format: {0}")]
    BadFilterFormat(String),

    /// Malformed sort clause (invalid direction, undecodable spec)
    #[error("bad sort format: {0}")]
    BadSortFormat(String),

    /// The model/field pair does not resolve against the schema registry
    #[error("field not found: {model}.{field}")]
    FieldNotFound { model: String, field: String },

    /// Negative page size or non-positive page number
    #[error("invalid page: {0}")]
    InvalidPage(String),

    /// Structurally invalid spec
    #[error("bad spec: {0}")]
    BadSpec(String),

    /// Storage collaborator failure
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for QueryError {
    fn from(err: sea_orm::DbErr) -> Self {
        QueryError::Db(err.to_string())
    }
}
