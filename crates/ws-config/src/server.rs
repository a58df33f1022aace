//! HTTP server configuration.

use serde::{Deserialize, Serialize};

/// Default listen address.
fn default_bind() -> String {
    String::from("0.0.0.0:3000")
}

/// Default club name shown to returning members.
fn default_brand() -> String {
    String::from("BIZZ.CLUB")
}

/// Default capacity of the webhook dispatch queue.
const fn default_notify_queue() -> usize {
    256
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address the API listens on.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Pending webhook notifications kept before new ones are dropped.
    #[serde(default = "default_notify_queue")]
    pub notify_queue: usize,

    /// Club name in the member greeting. Empty leaves it out.
    #[serde(default = "default_brand")]
    pub brand: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            notify_queue: default_notify_queue(),
            brand: default_brand(),
        }
    }
}
