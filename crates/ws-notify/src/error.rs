//! Notification error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The webhook answered with a non-success status.
    #[error("webhook rejected the notification ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The dispatch queue is full or closed.
    #[error("notification queue unavailable: {0}")]
    Queue(String),
}
