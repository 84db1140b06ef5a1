//! Contract models for the address service.

use chrono::{DateTime, Utc};

/// Reference to the entity owning an address.
///
/// Stored as two plain columns, a type tag plus the owner's primary key.
/// There is no database-level foreign key behind the pair; the write path is
/// responsible for only ever deriving it from a live owner row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OwnerRef {
    User(i64),
    Store(i64),
}

impl OwnerRef {
    /// The stored discriminator value for this owner type.
    #[must_use]
    pub fn type_tag(&self) -> &'static str {
        match self {
            OwnerRef::User(_) => "user",
            OwnerRef::Store(_) => "store",
        }
    }

    /// The owner's primary key.
    #[must_use]
    pub fn id(&self) -> i64 {
        match self {
            OwnerRef::User(id) | OwnerRef::Store(id) => *id,
        }
    }

    /// Rebuild a reference from the stored column pair.
    #[must_use]
    pub fn from_parts(discriminator: &str, parent_id: i64) -> Option<Self> {
        match discriminator {
            "user" => Some(OwnerRef::User(parent_id)),
            "store" => Some(OwnerRef::Store(parent_id)),
            _ => None,
        }
    }
}

impl std::fmt::Display for OwnerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.type_tag(), self.id())
    }
}

/// An address record.
#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub id: i64,
    pub name: Option<String>,
    pub is_default: bool,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub postcode: String,
    pub state: String,
    pub number: Option<i32>,
    pub complement: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub owner: OwnerRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating an address. The owner is never part of the payload;
/// it is supplied by the calling module.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAddress {
    pub name: String,
    pub is_default: bool,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub postcode: String,
    pub state: String,
    pub number: Option<i32>,
    pub complement: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Partial update; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressPatch {
    pub name: Option<String>,
    pub is_default: Option<bool>,
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub state: Option<String>,
    pub number: Option<i32>,
    pub complement: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}
