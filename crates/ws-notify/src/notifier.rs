//! Background webhook dispatch.
//!
//! Registrations must not wait on the webhook. [`Notifier::notify`] only
//! enqueues; a single worker task delivers in order and logs failures.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::client::WebhookSink;
use crate::error::NotifyError;
use crate::payload::WebhookPayload;

#[derive(Debug)]
struct Job {
    url: String,
    payload: WebhookPayload,
}

/// Cloneable handle that enqueues notifications.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::Sender<Job>,
}

/// Owns the worker task. Dropping it detaches the worker.
#[derive(Debug)]
pub struct DispatchWorker {
    handle: JoinHandle<()>,
}

impl Notifier {
    /// Start the worker on the current tokio runtime.
    ///
    /// At most `capacity` notifications wait in the queue; further ones are
    /// rejected until the worker catches up.
    #[must_use]
    pub fn spawn(sink: Arc<dyn WebhookSink>, capacity: usize) -> (Self, DispatchWorker) {
        let (tx, mut rx) = mpsc::channel::<Job>(capacity.max(1));
        let handle = tokio::spawn(async move {
            while let Some(job) = rx.recv().await {
                match sink.deliver(&job.url, &job.payload).await {
                    Ok(()) => tracing::info!(
                        workshop = %job.payload.workshop,
                        status = %job.payload.member_status,
                        "webhook notification sent"
                    ),
                    Err(e) => tracing::warn!(
                        workshop = %job.payload.workshop,
                        error = %e,
                        "webhook notification failed"
                    ),
                }
            }
            tracing::debug!("webhook dispatch queue closed");
        });
        (Self { tx }, DispatchWorker { handle })
    }

    /// Queue `payload` for delivery to `url` without waiting.
    ///
    /// An empty `url` means the workshop has no webhook; nothing is queued.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Queue`] if the queue is full or the worker has
    /// stopped. The notification is dropped.
    pub fn notify(&self, url: &str, payload: WebhookPayload) -> Result<(), NotifyError> {
        if url.trim().is_empty() {
            tracing::debug!(workshop = %payload.workshop, "no webhook configured, skipping");
            return Ok(());
        }
        self.tx
            .try_send(Job {
                url: url.to_string(),
                payload,
            })
            .map_err(|e| match e {
                mpsc::error::TrySendError::Full(_) => NotifyError::Queue("queue is full".into()),
                mpsc::error::TrySendError::Closed(_) => {
                    NotifyError::Queue("dispatcher stopped".into())
                }
            })
    }
}

impl DispatchWorker {
    /// Wait up to `timeout` for queued notifications to be delivered.
    ///
    /// Only returns early once every [`Notifier`] clone has been dropped,
    /// since the queue stays open while any of them is alive.
    pub async fn drain(self, timeout: Duration) {
        match tokio::time::timeout(timeout, self.handle).await {
            Ok(Ok(())) => tracing::debug!("webhook dispatch drained"),
            Ok(Err(e)) => tracing::error!(error = %e, "webhook dispatch task failed"),
            Err(_) => tracing::warn!(
                timeout_secs = timeout.as_secs(),
                "gave up waiting for pending webhook notifications"
            ),
        }
    }
}
