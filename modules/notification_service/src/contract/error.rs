//! Contract error types for the notification service.

/// Notification service domain errors
#[derive(Debug, Clone)]
pub enum NotificationError {
    /// The worker is gone and the queue no longer accepts jobs
    QueueClosed,
    /// The job's account id does not resolve to a recipient
    RecipientNotFound {
        /// Account identifier
        account_id: i64,
    },
    /// Template rendering failure
    Template {
        /// Template name
        template: String,
        /// Error details
        details: String,
    },
    /// Delivery API failure
    Delivery {
        /// Error details
        details: String,
    },
    /// Internal error
    Internal,
}

impl std::fmt::Display for NotificationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueueClosed => {
                write!(f, "notification queue is closed")
            }
            Self::RecipientNotFound { account_id } => {
                write!(f, "recipient not found for account: {}", account_id)
            }
            Self::Template { template, details } => {
                write!(f, "template '{}' failed to render: {}", template, details)
            }
            Self::Delivery { details } => {
                write!(f, "mail delivery failed: {}", details)
            }
            Self::Internal => {
                write!(f, "Internal error")
            }
        }
    }
}

impl std::error::Error for NotificationError {}
