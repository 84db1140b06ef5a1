//! Repository traits for account persistence.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use crate::contract::{Account, AccountError};

/// Storage-ready registration record: the password is already hashed and the
/// verification state decided.
#[derive(Debug, Clone)]
pub struct NewUserRecord {
    pub name: String,
    pub email: String,
    pub nickname: String,
    pub document_number: String,
    pub phones: Option<serde_json::Value>,
    pub avatar: Option<serde_json::Value>,
    pub external_data: Option<serde_json::Value>,
    pub birthdate: Option<NaiveDate>,
    pub password_hash: String,
    pub is_admin: bool,
    pub is_celebrity: bool,
    pub accept_legal_term: bool,
    pub email_verified_at: Option<DateTime<Utc>>,
}

/// Storage-ready partial update.
#[derive(Debug, Clone, Default)]
pub struct UserPatchRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub document_number: Option<String>,
    pub phones: Option<serde_json::Value>,
    pub avatar: Option<serde_json::Value>,
    pub external_data: Option<serde_json::Value>,
    pub birthdate: Option<NaiveDate>,
    pub is_celebrity: Option<bool>,
    pub accept_legal_term: Option<bool>,
    pub password_hash: Option<String>,
}

/// The to-be-unique fields of an account, probed before writes.
#[derive(Debug, Clone, Default)]
pub struct UniqueProbe {
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub document_number: Option<String>,
}

/// A stored password reset token.
#[derive(Debug, Clone, PartialEq)]
pub struct PasswordReset {
    pub id: i64,
    pub email: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expire_at: DateTime<Utc>,
}

/// Repository for user rows.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Insert a new user. A storage-level unique violation surfaces as
    /// `AccountError::Conflict`; the constraint, not the pre-check, is the
    /// source of truth.
    async fn create(&self, record: NewUserRecord) -> Result<Account, AccountError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Account>, AccountError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Advisory uniqueness pre-check: the names of every probed field whose
    /// value already exists on another row.
    async fn conflicting_fields(
        &self,
        probe: &UniqueProbe,
        exclude_id: Option<i64>,
    ) -> Result<Vec<String>, AccountError>;

    /// Apply a partial update; `None` when the id does not resolve.
    async fn update(
        &self,
        id: i64,
        patch: UserPatchRecord,
    ) -> Result<Option<Account>, AccountError>;

    async fn delete(&self, id: i64) -> Result<bool, AccountError>;

    async fn mark_email_verified(
        &self,
        id: i64,
        at: DateTime<Utc>,
    ) -> Result<Option<Account>, AccountError>;

    /// Replace the password hash of the account with this email; `false`
    /// when no such account exists.
    async fn set_password_hash(&self, email: &str, hash: String) -> Result<bool, AccountError>;
}

/// Repository for password reset tokens. One live token per email.
#[async_trait]
pub trait PasswordResetsRepository: Send + Sync {
    /// Store a token for the email, replacing any previous one.
    async fn upsert(
        &self,
        email: &str,
        token: &str,
        expire_at: DateTime<Utc>,
    ) -> Result<PasswordReset, AccountError>;

    /// Whether an unexpired token matching the pair exists.
    async fn is_valid(
        &self,
        email: &str,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, AccountError>;

    /// Drop the email's token (after a successful reset).
    async fn delete_for_email(&self, email: &str) -> Result<(), AccountError>;
}
