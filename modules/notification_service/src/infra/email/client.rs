//! HTTP adapter for the mail delivery API.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::instrument;

use crate::domain::service::MailPort;

/// Posts JSON payloads to a SendGrid-style delivery endpoint.
///
/// `reqwest::Client` is `Clone + Send + Sync`, so no external locking is
/// needed.
pub struct HttpMailClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpMailClient {
    #[must_use]
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
        }
    }
}

#[async_trait]
impl MailPort for HttpMailClient {
    #[instrument(skip_all, fields(api_url = %self.api_url))]
    async fn send(&self, payload: serde_json::Value) -> Result<()> {
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("POST mail delivery API")?;

        response
            .error_for_status()
            .context("mail delivery API status")?;

        Ok(())
    }
}
