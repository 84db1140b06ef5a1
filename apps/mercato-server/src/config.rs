//! Application configuration: YAML file plus `MERCATO_*` environment
//! overrides, deserialized into per-area typed sections and handed to each
//! component at construction time.

use std::path::Path;

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub auth: mercato_auth::AuthConfig,

    #[serde(default)]
    pub account: account_service::Config,

    #[serde(default)]
    pub pagination: mercato_query::PageLimits,

    #[serde(default)]
    pub notifier: notification_service::Config,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8080
}

fn default_database_url() -> String {
    "sqlite://mercato.db?mode=rwc".to_owned()
}

/// Load configuration from an optional YAML file with environment overrides
/// (`MERCATO_SERVER__PORT=9000` style).
pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::new();
    if let Some(path) = path {
        figment = figment.merge(Yaml::file(path));
    }
    figment
        .merge(Env::prefixed("MERCATO_").split("__"))
        .extract()
        .context("invalid configuration")
}
