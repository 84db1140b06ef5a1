//! REST DTOs with serde derives for the HTTP API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ===== Account DTOs =====

/// Account response DTO; the password hash never leaves the backend
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AccountDto {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub nickname: String,
    pub document_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phones: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<NaiveDate>,
    pub is_admin: bool,
    pub is_celebrity: bool,
    pub accept_legal_term: bool,
    pub email_verified_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterAccountRequest {
    pub name: String,
    pub email: String,
    pub nickname: String,
    pub document_number: String,
    pub password: String,
    #[serde(default)]
    pub phones: Option<serde_json::Value>,
    #[serde(default)]
    pub avatar: Option<serde_json::Value>,
    #[serde(default)]
    pub external_data: Option<serde_json::Value>,
    #[serde(default)]
    pub birthdate: Option<NaiveDate>,
    #[serde(default)]
    pub is_celebrity: bool,
    #[serde(default)]
    pub accept_legal_term: bool,
    /// Addresses created inline under the new account
    #[serde(default)]
    pub addresses: Vec<AddressCreateDto>,
}

/// Account update request; omitted fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateAccountRequest {
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

// ===== Auth DTOs =====

/// Password login form (`username` carries the email)
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Bearer token response
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenDto {
    pub access_token: String,
    pub token_type: String,
}

// ===== Password reset DTOs =====

/// Start a password reset
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PasswordForgotRequest {
    pub email: String,
}

/// Complete a password reset
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PasswordResetRequest {
    pub email: String,
    pub token: String,
    pub password: String,
}

// ===== Address DTOs =====

/// Address response DTO
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddressDto {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_default: bool,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub postcode: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Address creation request
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AddressCreateDto {
    pub name: String,
    #[serde(default = "default_true")]
    pub is_default: bool,
    pub street: String,
    pub neighborhood: String,
    pub city: String,
    pub postcode: String,
    pub state: String,
    #[serde(default)]
    pub number: Option<i32>,
    #[serde(default)]
    pub complement: Option<String>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

fn default_true() -> bool {
    true
}

/// Address update request; omitted fields are left untouched
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AddressUpdateDto {
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

/// Paginated address listing; the five keys are the page envelope contract
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AddressPageDto {
    pub items: Vec<AddressDto>,
    pub per_page: u64,
    pub num_pages: u64,
    pub page: u64,
    pub total: u64,
}
