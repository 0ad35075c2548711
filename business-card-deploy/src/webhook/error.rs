//! Webhook error types.

use thiserror::Error;

/// Errors that can occur while notifying the completion webhook.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// The URL is not of the form `https://<host><path>`.
    #[error("Invalid webhook url.")]
    InvalidUrl,

    /// The endpoint answered with something other than 200.
    #[error("Webhook returned {0}.")]
    Status(u16),

    /// The request could not be delivered.
    #[error("Webhook error: {0}.")]
    Transport(#[from] reqwest::Error),

    /// The background request was cancelled or panicked.
    #[error("Webhook task did not complete: {0}.")]
    Aborted(String),
}
