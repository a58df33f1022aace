//! # ws-notify
//!
//! Webhook notifications for new registrations.
//!
//! Each workshop may name a webhook URL (an automation endpoint that sends
//! confirmation emails and invoices). Delivery happens on a background task
//! so a slow or failing webhook never affects the registrant.

pub mod client;
pub mod error;
pub mod notifier;
pub mod payload;

pub use client::{WebhookClient, WebhookSink};
pub use error::NotifyError;
pub use notifier::{DispatchWorker, Notifier};
pub use payload::{InvoiceDetails, WebhookPayload};
