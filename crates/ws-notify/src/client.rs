//! HTTP delivery of webhook payloads.

use std::time::Duration;

use async_trait::async_trait;
use ws_config::WebhookConfig;

use crate::error::NotifyError;
use crate::payload::WebhookPayload;

/// Destination for registration notifications.
#[async_trait]
pub trait WebhookSink: Send + Sync {
    /// Deliver `payload` to `url`.
    async fn deliver(&self, url: &str, payload: &WebhookPayload) -> Result<(), NotifyError>;
}

/// Posts payloads as JSON with HTTP Basic Auth.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    http: reqwest::Client,
    username: String,
    password: String,
}

impl WebhookClient {
    /// # Errors
    ///
    /// Returns [`NotifyError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &WebhookConfig) -> Result<Self, NotifyError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("wsreg/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        if !config.is_configured() {
            tracing::warn!("webhook credentials not configured, sending without authentication");
        }
        Ok(Self {
            http,
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn request(&self, url: &str, payload: &WebhookPayload) -> reqwest::RequestBuilder {
        let request = self.http.post(url).json(payload);
        if self.username.is_empty() && self.password.is_empty() {
            request
        } else {
            request.basic_auth(&self.username, Some(&self.password))
        }
    }
}

#[async_trait]
impl WebhookSink for WebhookClient {
    async fn deliver(&self, url: &str, payload: &WebhookPayload) -> Result<(), NotifyError> {
        let resp = self.request(url, payload).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body: resp.text().await.unwrap_or_default(),
            });
        }
        tracing::debug!(url, status = status.as_u16(), "webhook delivered");
        Ok(())
    }
}
