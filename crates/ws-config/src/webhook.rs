//! Notification webhook credentials.

use serde::{Deserialize, Serialize};

/// Default HTTP timeout in seconds.
const fn default_timeout_secs() -> u64 {
    10
}

/// Basic Auth credentials shared by every workshop's webhook.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WebhookConfig {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,

    /// Per-request timeout, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl WebhookConfig {
    /// Check if Basic Auth credentials are present.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}
