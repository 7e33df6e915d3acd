use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use thiserror::Error;

use crate::config::MailerConfig;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while delivering a password-reset email.
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mail API request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("mail API returned status {0}")]
    Status(reqwest::StatusCode),
}

/// Delivers password-reset links. Unlike the order notifier, a delivery
/// failure here is surfaced to the caller: a reset request without an email
/// is useless.
#[async_trait]
pub trait ResetMailer: Send + Sync {
    async fn send_reset(&self, to: &str, reset_link: &str) -> Result<(), MailerError>;
}

/// Posts the reset email to a JSON mail API endpoint.
pub struct HttpMailer {
    client: Client,
    config: MailerConfig,
}

impl HttpMailer {
    pub fn new(config: MailerConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl ResetMailer for HttpMailer {
    async fn send_reset(&self, to: &str, reset_link: &str) -> Result<(), MailerError> {
        let body = json!({
            "from": self.config.from,
            "to": to,
            "subject": "Password reset",
            "text": format!("Follow the link to set a new password: {reset_link}"),
        });

        let response = self
            .client
            .post(&self.config.api_url)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(MailerError::Status(response.status()));
        }

        Ok(())
    }
}

/// Fallback used when no mail API is configured: logs the link so the flow
/// stays usable in development.
pub struct LogMailer;

#[async_trait]
impl ResetMailer for LogMailer {
    async fn send_reset(&self, to: &str, reset_link: &str) -> Result<(), MailerError> {
        log::info!("password reset link for {to}: {reset_link}");
        Ok(())
    }
}
