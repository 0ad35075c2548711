//! Context error types.

use thiserror::Error;

/// Errors that can occur while reading the workflow context.
#[derive(Debug, Error)]
pub enum ContextError {
    /// The repository is not in `owner/name` form.
    #[error("Invalid repository '{value}': expected 'owner/name'")]
    InvalidRepository { value: String },
}
