//! Job payloads handed to the dispatcher.

use uuid::Uuid;

/// Handle returned by a dispatch; identifies the queued job.
pub type JobId = Uuid;

/// A named email job plus its payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmailJob {
    /// Password-reset email carrying the callback URL with the token
    PasswordReset { account_id: i64, url: String },
    /// Address-verification email carrying the signed verification URL
    EmailVerification { account_id: i64, url: String },
}

impl EmailJob {
    /// Job name as it appears in logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            EmailJob::PasswordReset { .. } => "send_mail_reset_password",
            EmailJob::EmailVerification { .. } => "send_mail_verification",
        }
    }

    #[must_use]
    pub fn account_id(&self) -> i64 {
        match self {
            EmailJob::PasswordReset { account_id, .. }
            | EmailJob::EmailVerification { account_id, .. } => *account_id,
        }
    }
}

/// The recipient of an email, resolved through [`super::AccountDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub name: String,
    pub email: String,
}
