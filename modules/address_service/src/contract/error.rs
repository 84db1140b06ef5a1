//! Contract error types for the address service.

use mercato_query::QueryError;

/// Address service domain errors
#[derive(Debug, Clone)]
pub enum AddressError {
    /// No address with this id under this owner. A mismatched owner reports
    /// the same way as a missing id.
    NotFound {
        /// Address identifier
        id: i64,
    },
    /// Listing spec or pagination failure
    Query(QueryError),
    /// Internal error
    Internal,
}

impl std::fmt::Display for AddressError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { id } => {
                write!(f, "address not found: {}", id)
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

impl std::error::Error for AddressError {}

impl From<QueryError> for AddressError {
    fn from(err: QueryError) -> Self {
        Self::Query(err)
    }
}
