//! Contract models for the account service.

use address_service::contract::{NewAddress, OwnerRef};
use chrono::{DateTime, NaiveDate, Utc};

/// A user account.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub nickname: String,
    pub document_number: String,
    pub phones: Option<serde_json::Value>,
    pub avatar: Option<serde_json::Value>,
    pub external_data: Option<serde_json::Value>,
    pub birthdate: Option<NaiveDate>,
    /// Argon2 PHC string; never leaves the backend
    pub password_hash: String,
    pub is_admin: bool,
    pub is_celebrity: bool,
    pub accept_legal_term: bool,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// The polymorphic owner reference this account presents to the address
    /// service.
    #[must_use]
    pub fn owner_ref(&self) -> OwnerRef {
        OwnerRef::User(self.id)
    }

    #[must_use]
    pub fn is_verified(&self) -> bool {
        self.email_verified_at.is_some()
    }
}

/// Registration payload. The password is plain text here and hashed by the
/// domain service before it reaches storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    pub name: String,
    pub email: String,
    pub nickname: String,
    pub document_number: String,
    pub password: String,
    pub phones: Option<serde_json::Value>,
    pub avatar: Option<serde_json::Value>,
    pub external_data: Option<serde_json::Value>,
    pub birthdate: Option<NaiveDate>,
    pub is_celebrity: bool,
    pub accept_legal_term: bool,
    /// Addresses created inline under the new account
    pub addresses: Vec<NewAddress>,
}

/// Partial account update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub nickname: Option<String>,
    pub document_number: Option<String>,
    pub password: Option<String>,
    pub phones: Option<serde_json::Value>,
    pub avatar: Option<serde_json::Value>,
    pub external_data: Option<serde_json::Value>,
    pub birthdate: Option<NaiveDate>,
    pub is_celebrity: Option<bool>,
    pub accept_legal_term: Option<bool>,
}
