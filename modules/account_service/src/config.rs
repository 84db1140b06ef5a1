//! Configuration for the account service module.

use serde::Deserialize;

/// Account workflow configuration, one section of the application config.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// When disabled, new accounts start with a verified email and no
    /// verification mail is sent
    #[serde(default = "default_true")]
    pub email_verify_enabled: bool,

    /// Password reset token lifetime in minutes
    #[serde(default = "default_reset_expire_minutes")]
    pub password_reset_expire_minutes: i64,

    /// External base URL used to build verification and reset links
    #[serde(default = "default_public_url")]
    pub public_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            email_verify_enabled: true,
            password_reset_expire_minutes: default_reset_expire_minutes(),
            public_url: default_public_url(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_reset_expire_minutes() -> i64 {
    30
}

fn default_public_url() -> String {
    "http://localhost:8080".to_owned()
}
