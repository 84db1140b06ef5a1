//! Email composition: recipient lookup, template rendering, delivery payload.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tera::Tera;
use tracing::{info, instrument};

use crate::config::Config;
use crate::contract::{AccountDirectory, EmailJob, NotificationError, Recipient};

const PASSWORD_RESET_TEMPLATE: &str = "password_reset.html";
const VERIFY_EMAIL_TEMPLATE: &str = "verify_email.html";

/// Outbound mail delivery port; the HTTP implementation lives in infra.
#[async_trait]
pub trait MailPort: Send + Sync {
    async fn send(&self, payload: serde_json::Value) -> Result<()>;
}

/// Domain service turning jobs into delivered emails.
pub struct Service {
    directory: Arc<dyn AccountDirectory>,
    mail: Arc<dyn MailPort>,
    templates: Tera,
    config: Config,
}

impl Service {
    /// Build the service with its embedded templates.
    ///
    /// # Errors
    /// Fails when a bundled template does not parse.
    pub fn new(
        directory: Arc<dyn AccountDirectory>,
        mail: Arc<dyn MailPort>,
        config: Config,
    ) -> Result<Self> {
        let mut templates = Tera::default();
        templates.add_raw_template(
            PASSWORD_RESET_TEMPLATE,
            include_str!("../../templates/password_reset.html"),
        )?;
        templates.add_raw_template(
            VERIFY_EMAIL_TEMPLATE,
            include_str!("../../templates/verify_email.html"),
        )?;

        Ok(Self {
            directory,
            mail,
            templates,
            config,
        })
    }

    /// Execute one job end to end.
    #[instrument(skip(self, job), fields(job = job.name(), account_id = job.account_id()))]
    pub async fn process(&self, job: EmailJob) -> Result<(), NotificationError> {
        let account_id = job.account_id();
        let recipient = self
            .directory
            .find_recipient(account_id)
            .await
            .map_err(|_| NotificationError::Internal)?
            .ok_or(NotificationError::RecipientNotFound { account_id })?;

        let (template, subject, button_title, url) = match &job {
            EmailJob::PasswordReset { url, .. } => (
                PASSWORD_RESET_TEMPLATE,
                "Password reset notification",
                "Reset password",
                url,
            ),
            EmailJob::EmailVerification { url, .. } => (
                VERIFY_EMAIL_TEMPLATE,
                "Check email address",
                "Check email address",
                url,
            ),
        };

        let mut context = tera::Context::new();
        context.insert("app_title", &self.config.app_title);
        context.insert("subject", subject);
        context.insert("button_title", button_title);
        context.insert("url", url);
        context.insert("name", &recipient.name);
        context.insert(
            "expire_minutes",
            &self.config.password_reset_expire_minutes,
        );

        let html = self
            .templates
            .render(template, &context)
            .map_err(|e| NotificationError::Template {
                template: template.to_owned(),
                details: e.to_string(),
            })?;

        let payload = self.payload(&recipient, subject, &html);

        self.mail
            .send(payload)
            .await
            .map_err(|e| NotificationError::Delivery {
                details: e.to_string(),
            })?;

        info!("email sent");
        Ok(())
    }

    /// Delivery API payload: personalizations, sender, reply-to, one HTML part.
    fn payload(&self, recipient: &Recipient, subject: &str, html: &str) -> serde_json::Value {
        serde_json::json!({
            "personalizations": [
                {
                    "to": [{"email": recipient.email, "name": recipient.name}],
                    "subject": subject,
                }
            ],
            "from": {
                "email": self.config.mail_from_email,
                "name": self.config.mail_from_name,
            },
            "reply_to": {
                "email": self.config.mail_from_email,
                "name": self.config.mail_from_name,
            },
            "content": [
                {
                    "type": "text/html",
                    "value": html,
                }
            ],
        })
    }
}
