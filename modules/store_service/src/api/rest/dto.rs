//! REST DTOs with serde derives for the HTTP API.
//!
//! Address DTOs are shared with the account area; a store address and an
//! account address have the same wire shape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use account_service::api::rest::dto::{
    AddressCreateDto, AddressDto, AddressPageDto, AddressUpdateDto,
};

// ===== Segment DTOs =====

/// Segment response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SegmentDto {
    pub id: i64,
    pub title: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Segment creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SegmentCreateRequest {
    pub title: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Segment update request; omitted fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct SegmentUpdateRequest {
    pub title: Option<String>,
    pub is_active: Option<bool>,
    pub image: Option<String>,
    pub color: Option<String>,
}

/// Paginated segment listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SegmentPageDto {
    pub items: Vec<SegmentDto>,
    pub per_page: u64,
    pub num_pages: u64,
    pub page: u64,
    pub total: u64,
}

// ===== Store DTOs =====

/// Store response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoreDto {
    pub id: i64,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legal: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub information: Option<serde_json::Value>,
    pub automatic_accept: bool,
    pub is_active: bool,
    pub document_type: String,
    pub document_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Store creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StoreCreateRequest {
    pub title: String,
    pub legal: String,
    #[serde(default)]
    pub phones: Option<serde_json::Value>,
    #[serde(default)]
    pub information: Option<serde_json::Value>,
    #[serde(default)]
    pub automatic_accept: bool,
    /// `cpf` or `cnpj`
    pub document_type: String,
    pub document_number: String,
    pub segment_id: i64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub background_image: Option<String>,
    /// Addresses created inline under the new store
    #[serde(default)]
    pub addresses: Vec<AddressCreateDto>,
}

/// Store update request; omitted fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct StoreUpdateRequest {
    pub title: Option<String>,
    pub legal: Option<String>,
    pub phones: Option<serde_json::Value>,
    pub information: Option<serde_json::Value>,
    pub automatic_accept: Option<bool>,
    pub is_active: Option<bool>,
    pub document_type: Option<String>,
    pub document_number: Option<String>,
    pub segment_id: Option<i64>,
    pub image: Option<String>,
    pub background_image: Option<String>,
}

/// Paginated store listing
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StorePageDto {
    pub items: Vec<StoreDto>,
    pub per_page: u64,
    pub num_pages: u64,
    pub page: u64,
    pub total: u64,
}

fn default_true() -> bool {
    true
}
