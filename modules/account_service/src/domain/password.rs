//! Password hashing and the reset workflow.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use base64::Engine;
use chrono::{Duration, Utc};
use notification_service::EmailJob;
use rand::RngCore;
use tracing::{info, instrument, warn};

use crate::contract::AccountError;
use crate::domain::service::Service;

/// Hash a password using Argon2id with a fresh salt.
pub fn hash_password(password: &str) -> Result<String, AccountError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AccountError::Internal)
}

/// Verify a password against a stored PHC string.
pub fn verify_password(hash: &str, password: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// A url-safe random token for reset links.
fn generate_reset_token() -> String {
    let mut bytes = [0u8; 64];
    rand::rng().fill_bytes(&mut bytes);
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}

impl Service {
    // ===== Password reset workflow =====

    /// Start a password reset for the email.
    ///
    /// Always succeeds from the caller's perspective; whether the email
    /// belongs to an account is never revealed. A fresh token replaces any
    /// previous one and the reset mail is queued fire-and-forget.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AccountError> {
        let Some(account) = self.users().find_by_email(email).await? else {
            info!("password reset requested for unknown email");
            return Ok(());
        };

        let token = generate_reset_token();
        let expire_at =
            Utc::now() + Duration::minutes(self.config().password_reset_expire_minutes);
        self.resets().upsert(email, &token, expire_at).await?;

        let url = format!(
            "{}/account/accounts/password/reset?email={}&token={}",
            self.config().public_url,
            account.email,
            token
        );

        if let Err(err) = self.dispatcher().dispatch(EmailJob::PasswordReset {
            account_id: account.id,
            url,
        }) {
            warn!(error = %err, "could not queue password reset email");
        }

        info!(user_id = account.id, "password reset token created");
        Ok(())
    }

    /// Complete a password reset: consume the token, store the new hash.
    #[instrument(skip(self, token, password), fields(email = %email))]
    pub async fn reset_password(
        &self,
        email: &str,
        token: &str,
        password: &str,
    ) -> Result<(), AccountError> {
        let valid = self.resets().is_valid(email, token, Utc::now()).await?;
        if !valid {
            return Err(AccountError::InvalidResetToken);
        }

        let hash = hash_password(password)?;
        let updated = self.users().set_password_hash(email, hash).await?;
        if !updated {
            return Err(AccountError::InvalidResetToken);
        }

        self.resets().delete_for_email(email).await?;

        info!("password reset completed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted_and_verifiable() {
        let hash = hash_password("s3cret-pass").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(&hash, "s3cret-pass"));
        assert!(!verify_password(&hash, "wrong-pass"));

        let other = hash_password("s3cret-pass").unwrap();
        assert_ne!(hash, other);
    }

    #[test]
    fn garbage_hash_never_verifies() {
        assert!(!verify_password("not-a-phc-string", "anything"));
    }

    #[test]
    fn reset_tokens_are_long_and_url_safe() {
        let token = generate_reset_token();
        assert!(token.len() >= 86);
        assert!(token
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_ne!(token, generate_reset_token());
    }
}
