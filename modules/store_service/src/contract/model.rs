//! Contract models for the store service.

use address_service::contract::{NewAddress, OwnerRef};
use chrono::{DateTime, Utc};

/// A store category.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub id: i64,
    pub title: String,
    pub is_active: bool,
    pub image: Option<String>,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Segment creation payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSegment {
    pub title: String,
    pub is_active: bool,
    pub image: Option<String>,
    pub color: Option<String>,
}

/// Partial segment update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentPatch {
    pub title: Option<String>,
    pub is_active: Option<bool>,
    pub image: Option<String>,
    pub color: Option<String>,
}

/// Legal document kind of a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    /// Natural person
    Cpf,
    /// Legal entity
    Cnpj,
}

impl DocumentType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DocumentType::Cpf => "cpf",
            DocumentType::Cnpj => "cnpj",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "cpf" => Some(DocumentType::Cpf),
            "cnpj" => Some(DocumentType::Cnpj),
            _ => None,
        }
    }
}

/// A store.
#[derive(Debug, Clone, PartialEq)]
pub struct Store {
    pub id: i64,
    pub title: String,
    pub legal: Option<String>,
    pub phones: Option<serde_json::Value>,
    pub information: Option<serde_json::Value>,
    pub external_data: Option<serde_json::Value>,
    pub automatic_accept: bool,
    pub is_active: bool,
    pub document_type: DocumentType,
    pub document_number: String,
    pub approved_at: Option<DateTime<Utc>>,
    pub segment_id: Option<i64>,
    pub image: Option<String>,
    pub background_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// The polymorphic owner reference this store presents to the address
    /// service.
    #[must_use]
    pub fn owner_ref(&self) -> OwnerRef {
        OwnerRef::Store(self.id)
    }
}

/// Store creation payload. The creating user becomes the owner person.
#[derive(Debug, Clone, PartialEq)]
pub struct NewStore {
    pub title: String,
    pub legal: String,
    pub phones: Option<serde_json::Value>,
    pub information: Option<serde_json::Value>,
    pub automatic_accept: bool,
    pub document_type: DocumentType,
    pub document_number: String,
    pub segment_id: i64,
    pub image: Option<String>,
    pub background_image: Option<String>,
    /// Addresses created inline under the new store
    pub addresses: Vec<NewAddress>,
}

/// Partial store update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StorePatch {
    pub title: Option<String>,
    pub legal: Option<String>,
    pub phones: Option<serde_json::Value>,
    pub information: Option<serde_json::Value>,
    pub automatic_accept: Option<bool>,
    pub is_active: Option<bool>,
    pub document_type: Option<DocumentType>,
    pub document_number: Option<String>,
    pub segment_id: Option<i64>,
    pub image: Option<String>,
    pub background_image: Option<String>,
}

/// Store membership row linking a user to a store.
#[derive(Debug, Clone, PartialEq)]
pub struct StorePerson {
    pub id: i64,
    pub store_id: i64,
    pub user_id: i64,
    pub is_owner: bool,
    pub is_staff: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
