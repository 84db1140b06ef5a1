//! Domain service - account lifecycle and authentication.

use std::sync::Arc;

use chrono::Utc;
use notification_service::NotificationDispatcher;
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::contract::{Account, AccountError, AccountPatch, NewAccount};
use crate::domain::password::{hash_password, verify_password};
use crate::domain::repository::{
    NewUserRecord, PasswordResetsRepository, UniqueProbe, UserPatchRecord, UsersRepository,
};

/// Domain service for account management
pub struct Service {
    users: Arc<dyn UsersRepository>,
    resets: Arc<dyn PasswordResetsRepository>,
    addresses: Arc<address_service::domain::Service>,
    dispatcher: Arc<dyn NotificationDispatcher>,
    config: Config,
}

impl Service {
    pub fn new(
        users: Arc<dyn UsersRepository>,
        resets: Arc<dyn PasswordResetsRepository>,
        addresses: Arc<address_service::domain::Service>,
        dispatcher: Arc<dyn NotificationDispatcher>,
        config: Config,
    ) -> Self {
        Self {
            users,
            resets,
            addresses,
            dispatcher,
            config,
        }
    }

    pub(crate) fn users(&self) -> &dyn UsersRepository {
        self.users.as_ref()
    }

    pub(crate) fn resets(&self) -> &dyn PasswordResetsRepository {
        self.resets.as_ref()
    }

    pub(crate) fn dispatcher(&self) -> &dyn NotificationDispatcher {
        self.dispatcher.as_ref()
    }

    pub(crate) fn config(&self) -> &Config {
        &self.config
    }

    // ===== Account operations =====

    /// Register a new account.
    ///
    /// The uniqueness pre-check enumerates every conflicting field in one
    /// error; the storage unique constraints behind it are authoritative
    /// under races and surface as the same error kind.
    #[instrument(skip_all, fields(email = %account.email))]
    pub async fn register(&self, account: NewAccount) -> Result<Account, AccountError> {
        let probe = UniqueProbe {
            email: Some(account.email.clone()),
            nickname: Some(account.nickname.clone()),
            document_number: Some(account.document_number.clone()),
        };
        let conflicts = self.users.conflicting_fields(&probe, None).await?;
        if !conflicts.is_empty() {
            return Err(AccountError::Conflict { fields: conflicts });
        }

        let password_hash = hash_password(&account.password)?;
        let email_verified_at = if self.config.email_verify_enabled {
            None
        } else {
            Some(Utc::now())
        };

        let record = NewUserRecord {
            name: account.name,
            email: account.email,
            nickname: account.nickname,
            document_number: account.document_number,
            phones: account.phones,
            avatar: account.avatar,
            external_data: account.external_data,
            birthdate: account.birthdate,
            password_hash,
            is_admin: false,
            is_celebrity: account.is_celebrity,
            accept_legal_term: account.accept_legal_term,
            email_verified_at,
        };

        let created = self.users.create(record).await?;

        for address in account.addresses {
            self.addresses
                .create(created.owner_ref(), address)
                .await
                .map_err(|_| AccountError::Internal)?;
        }

        if self.config.email_verify_enabled {
            // Fire-and-forget; a failed enqueue never fails the registration
            if let Err(err) = self.send_verification_email(&created) {
                warn!(error = %err, "could not queue verification email");
            }
        }

        info!(user_id = created.id, "account created");
        Ok(created)
    }

    /// Get an account by id.
    pub async fn get(&self, account_id: i64) -> Result<Account, AccountError> {
        self.users
            .find_by_id(account_id)
            .await?
            .ok_or(AccountError::NotFound { id: account_id })
    }

    /// Get an account by email; `None` is not an error here, callers decide.
    pub async fn get_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        self.users.find_by_email(email).await
    }

    /// Update the account. Unique fields are re-checked excluding the
    /// account itself; a password change is re-hashed.
    #[instrument(skip_all, fields(user_id = account.id))]
    pub async fn update(
        &self,
        account: &Account,
        patch: AccountPatch,
    ) -> Result<Account, AccountError> {
        let probe = UniqueProbe {
            email: patch.email.clone(),
            nickname: patch.nickname.clone(),
            document_number: patch.document_number.clone(),
        };
        let conflicts = self
            .users
            .conflicting_fields(&probe, Some(account.id))
            .await?;
        if !conflicts.is_empty() {
            return Err(AccountError::Conflict { fields: conflicts });
        }

        let password_hash = match patch.password.as_deref() {
            Some(password) => Some(hash_password(password)?),
            None => None,
        };

        let record = UserPatchRecord {
            name: patch.name,
            email: patch.email,
            nickname: patch.nickname,
            document_number: patch.document_number,
            phones: patch.phones,
            avatar: patch.avatar,
            external_data: patch.external_data,
            birthdate: patch.birthdate,
            is_celebrity: patch.is_celebrity,
            accept_legal_term: patch.accept_legal_term,
            password_hash,
        };

        let updated = self
            .users
            .update(account.id, record)
            .await?
            .ok_or(AccountError::NotFound { id: account.id })?;

        info!("account updated");
        Ok(updated)
    }

    /// Delete the account and cascade its addresses.
    #[instrument(skip_all, fields(user_id = account.id))]
    pub async fn delete(&self, account: &Account) -> Result<(), AccountError> {
        let deleted = self.users.delete(account.id).await?;
        if !deleted {
            return Err(AccountError::NotFound { id: account.id });
        }

        self.addresses
            .delete_for_owner(account.owner_ref())
            .await
            .map_err(|_| AccountError::Internal)?;

        info!("account deleted");
        Ok(())
    }

    // ===== Authentication =====

    /// Verify credentials and return the account.
    ///
    /// A missing account and a wrong password are indistinguishable to the
    /// caller.
    #[instrument(skip_all, fields(email = %email))]
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let Some(account) = self.users.find_by_email(email).await? else {
            return Err(AccountError::InvalidCredentials);
        };

        if !verify_password(&account.password_hash, password) {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }
}
