//! Contract error types for the account service.

/// Account service domain errors
#[derive(Debug, Clone)]
pub enum AccountError {
    /// Account not found
    NotFound {
        /// Account identifier
        id: i64,
    },
    /// One or more to-be-unique fields already exist. Every conflicting
    /// field is listed so the caller can correct them in one round trip.
    Conflict {
        /// Conflicting field names
        fields: Vec<String>,
    },
    /// Login failed; never distinguishes a missing account from a wrong
    /// password
    InvalidCredentials,
    /// The operation requires a verified email address
    EmailNotVerified,
    /// The verification signature does not match the account
    InvalidSignature,
    /// The password reset token is unknown, consumed, or expired
    InvalidResetToken,
    /// Validation error
    Validation {
        /// Validation error message
        message: String,
    },
    /// Internal error
    Internal,
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { id } => {
                write!(f, "account not found: {}", id)
            }
            Self::Conflict { fields } => {
                write!(f, "already exists: {}", fields.join(", "))
            }
            Self::InvalidCredentials => {
                write!(f, "incorrect email or password")
            }
            Self::EmailNotVerified => {
                write!(f, "email not verified")
            }
            Self::InvalidSignature => {
                write!(f, "invalid verification signature")
            }
            Self::InvalidResetToken => {
                write!(f, "invalid or expired reset token")
            }
            Self::Validation { message } => {
                write!(f, "validation error: {}", message)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for AccountError {}
