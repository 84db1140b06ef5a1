//! Configuration for the notification service module.

use serde::Deserialize;

/// Notifier configuration, one section of the application config.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Mail delivery HTTP API endpoint
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Bearer key for the delivery API
    #[serde(default)]
    pub api_key: String,

    /// Sender address
    #[serde(default = "default_from_email")]
    pub mail_from_email: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub mail_from_name: String,

    /// Application title rendered into email templates
    #[serde(default = "default_app_title")]
    pub app_title: String,

    /// Password reset link lifetime rendered into the reset email
    #[serde(default = "default_reset_expire_minutes")]
    pub password_reset_expire_minutes: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_key: String::new(),
            mail_from_email: default_from_email(),
            mail_from_name: default_from_name(),
            app_title: default_app_title(),
            password_reset_expire_minutes: default_reset_expire_minutes(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.sendgrid.com/v3/mail/send".to_owned()
}

fn default_from_email() -> String {
    "no-reply@mercato.local".to_owned()
}

fn default_from_name() -> String {
    "Mercato".to_owned()
}

fn default_app_title() -> String {
    "Mercato".to_owned()
}

fn default_reset_expire_minutes() -> i64 {
    30
}
