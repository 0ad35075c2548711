//! Webhook request body.

use serde::Serialize;

/// Body POSTed to the completion webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WebhookPayload {
    /// Deployed repository in "owner/name" format.
    pub repo: String,
}

impl WebhookPayload {
    pub fn new(repo: impl Into<String>) -> Self {
        Self { repo: repo.into() }
    }
}
