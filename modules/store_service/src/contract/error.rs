//! Contract error types for the store service.

use mercato_query::QueryError;

/// Store service domain errors
#[derive(Debug, Clone)]
pub enum StoreError {
    /// Segment or store not found
    NotFound {
        /// Resource type (segment, store)
        resource: String,
        /// Resource identifier
        id: i64,
    },
    /// One or more to-be-unique fields already exist
    Conflict {
        /// Conflicting field names
        fields: Vec<String>,
    },
    /// The acting user is neither the store owner nor an admin
    Forbidden,
    /// Validation error
    Validation {
        /// Validation error message
        message: String,
    },
    /// Listing spec or pagination failure
    Query(QueryError),
    /// Internal error
    Internal,
}

impl StoreError {
    pub fn segment_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "segment".to_owned(),
            id,
        }
    }

    pub fn store_not_found(id: i64) -> Self {
        Self::NotFound {
            resource: "store".to_owned(),
            id,
        }
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource, id } => {
                write!(f, "{} not found: {}", resource, id)
            }
            Self::Conflict { fields } => {
                write!(f, "already exists: {}", fields.join(", "))
            }
            Self::Forbidden => {
                write!(f, "Forbidden")
            }
            Self::Validation { message } => {
                write!(f, "validation error: {}", message)
            }
            Self::Query(err) => {
                write!(f, "{}", err)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for StoreError {}

impl From<QueryError> for StoreError {
    fn from(err: QueryError) -> Self {
        Self::Query(err)
    }
}
