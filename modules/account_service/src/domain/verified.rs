//! Email verification workflow.
//!
//! Verification links carry a deterministic signature derived from the
//! account's creation instant and its password hash. The hash embeds the
//! Argon2 salt, so changing the password invalidates outstanding links
//! without any stored token.

use chrono::Utc;
use notification_service::EmailJob;
use sha2::{Digest, Sha256};
use tracing::{info, instrument};

use crate::contract::{Account, AccountError};
use crate::domain::service::Service;

/// The verification signature for an account.
pub fn signature(account: &Account) -> String {
    let word = format!(
        "{}-{}",
        account.created_at.timestamp(),
        account.password_hash
    );
    hex::encode(Sha256::digest(word.as_bytes()))
}

/// Constant-time signature comparison.
pub fn signature_is_valid(account: &Account, candidate: &str) -> bool {
    let expected = signature(account);
    let (a, b) = (expected.as_bytes(), candidate.as_bytes());
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

impl Service {
    // ===== Email verification workflow =====

    /// Build the signed verification URL for an account.
    pub fn verify_email_url(&self, account: &Account) -> String {
        format!(
            "{}/account/accounts/verify/{}/{}",
            self.config().public_url,
            account.id,
            signature(account)
        )
    }

    /// Queue the verification email.
    pub(crate) fn send_verification_email(&self, account: &Account) -> Result<(), AccountError> {
        let url = self.verify_email_url(account);
        self.dispatcher()
            .dispatch(EmailJob::EmailVerification {
                account_id: account.id,
                url,
            })
            .map_err(|_| AccountError::Internal)?;
        Ok(())
    }

    /// Mark the account's email as verified if the signature matches.
    ///
    /// Verifying an already-verified account is a no-op success, so stale
    /// links stay harmless.
    #[instrument(skip(self, candidate), fields(user_id = account_id))]
    pub async fn verify_email(
        &self,
        account_id: i64,
        candidate: &str,
    ) -> Result<Account, AccountError> {
        let account = self.get(account_id).await?;

        if !signature_is_valid(&account, candidate) {
            return Err(AccountError::InvalidSignature);
        }

        if account.is_verified() {
            return Ok(account);
        }

        let account = self
            .users()
            .mark_email_verified(account_id, Utc::now())
            .await?
            .ok_or(AccountError::NotFound { id: account_id })?;

        info!("email verified");
        Ok(account)
    }

    /// Re-send the verification email for an authenticated account.
    #[instrument(skip_all, fields(user_id = account.id))]
    pub async fn resend_verification_email(
        &self,
        account: &Account,
    ) -> Result<(), AccountError> {
        if account.is_verified() {
            return Err(AccountError::Validation {
                message: "email already verified".to_owned(),
            });
        }
        self.send_verification_email(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn account() -> Account {
        Account {
            id: 1,
            name: "Maria".to_owned(),
            email: "maria@example.com".to_owned(),
            nickname: "maria".to_owned(),
            document_number: "123".to_owned(),
            phones: None,
            avatar: None,
            external_data: None,
            birthdate: None,
            password_hash: "$argon2id$v=19$m=19456,t=2,p=1$abc$def".to_owned(),
            is_admin: false,
            is_celebrity: false,
            accept_legal_term: true,
            email_verified_at: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn signature_is_deterministic_per_account_state() {
        let account = account();
        assert_eq!(signature(&account), signature(&account));
        assert!(signature_is_valid(&account, &signature(&account)));
    }

    #[test]
    fn signature_changes_with_the_password_hash() {
        let account = account();
        let mut rehashed = account.clone();
        rehashed.password_hash = "$argon2id$v=19$m=19456,t=2,p=1$xyz$uvw".to_owned();

        let stale = signature(&account);
        assert!(!signature_is_valid(&rehashed, &stale));
    }

    #[test]
    fn truncated_or_padded_signatures_fail() {
        let account = account();
        let good = signature(&account);
        assert!(!signature_is_valid(&account, &good[..good.len() - 1]));
        assert!(!signature_is_valid(&account, &format!("{good}0")));
    }
}
