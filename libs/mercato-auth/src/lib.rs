//! Bearer-token authentication primitives.
//!
//! Issues and validates HS256 access tokens. The signing configuration is
//! passed in explicitly; nothing in this crate reads global state.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Signing configuration, one section of the application config.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// HMAC secret used to sign and verify tokens
    #[serde(default = "default_secret_key")]
    pub secret_key: String,

    /// Signing algorithm name (only HMAC variants are meaningful here)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Access token lifetime in minutes
    #[serde(default = "default_expire_minutes")]
    pub access_token_expire_minutes: i64,
}

fn default_secret_key() -> String {
    // Development fallback; deployments override via config or environment
    "change-me".to_owned()
}

fn default_algorithm() -> String {
    "HS256".to_owned()
}

fn default_expire_minutes() -> i64 {
    30
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret_key: default_secret_key(),
            algorithm: default_algorithm(),
            access_token_expire_minutes: default_expire_minutes(),
        }
    }
}

impl AuthConfig {
    fn algorithm(&self) -> Result<Algorithm, AuthError> {
        self.algorithm
            .parse::<Algorithm>()
            .map_err(|_| AuthError::UnsupportedAlgorithm(self.algorithm.clone()))
    }
}

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account email
    pub sub: String,
    /// Expiry as a unix timestamp
    pub exp: i64,
}

/// Bearer token response body, the login endpoint's wire contract.
#[derive(Debug, Clone, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("unsupported signing algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("token encoding failed: {0}")]
    Encoding(#[source] jsonwebtoken::errors::Error),

    #[error("invalid or expired token")]
    InvalidToken,
}

/// Issue a bearer access token for the given subject.
///
/// # Errors
/// Returns `AuthError::UnsupportedAlgorithm` for an unknown algorithm name
/// and `AuthError::Encoding` if signing fails.
pub fn issue_access_token(subject: &str, config: &AuthConfig) -> Result<TokenResponse, AuthError> {
    let expire = Utc::now() + Duration::minutes(config.access_token_expire_minutes);
    let claims = Claims {
        sub: subject.to_owned(),
        exp: expire.timestamp(),
    };

    let token = encode(
        &Header::new(config.algorithm()?),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )
    .map_err(AuthError::Encoding)?;

    Ok(TokenResponse {
        access_token: token,
        token_type: "bearer".to_owned(),
    })
}

/// Validate a bearer token and return its subject.
///
/// # Errors
/// Returns `AuthError::InvalidToken` for any signature, shape, or expiry
/// failure; callers map this to a 401 without distinguishing causes.
pub fn decode_subject(token: &str, config: &AuthConfig) -> Result<String, AuthError> {
    let validation = Validation::new(config.algorithm()?);
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret_key.as_bytes()),
        &validation,
    )
    .map_err(|_| AuthError::InvalidToken)?;

    Ok(data.claims.sub)
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
        return None;
    }
    Some(token.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> AuthConfig {
        AuthConfig {
            secret_key: "test-secret".to_owned(),
            algorithm: "HS256".to_owned(),
            access_token_expire_minutes: 30,
        }
    }

    #[test]
    fn issued_token_round_trips() {
        let cfg = config();
        let token = issue_access_token("user@example.com", &cfg).unwrap();
        assert_eq!(token.token_type, "bearer");

        let subject = decode_subject(&token.access_token, &cfg).unwrap();
        assert_eq!(subject, "user@example.com");
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let cfg = config();
        let token = issue_access_token("user@example.com", &cfg).unwrap();

        let other = AuthConfig {
            secret_key: "other-secret".to_owned(),
            ..cfg
        };
        assert!(matches!(
            decode_subject(&token.access_token, &other),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let cfg = AuthConfig {
            access_token_expire_minutes: -5,
            ..config()
        };
        let token = issue_access_token("user@example.com", &cfg).unwrap();
        assert!(decode_subject(&token.access_token, &cfg).is_err());
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let cfg = AuthConfig {
            algorithm: "ED25519-NOPE".to_owned(),
            ..config()
        };
        assert!(matches!(
            issue_access_token("user@example.com", &cfg),
            Err(AuthError::UnsupportedAlgorithm(_))
        ));
    }

    #[test]
    fn bearer_header_parsing() {
        assert_eq!(bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(bearer_token("bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer"), None);
    }
}
