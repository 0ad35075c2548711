//! Publish error types.

use crate::steps::StepError;
use thiserror::Error;

/// Errors that can occur while publishing the build.
#[derive(Debug, Error)]
pub enum PublishError {
    /// Preparing the local commit failed.
    #[error(transparent)]
    Git(StepError),

    /// Pushing to the deploy branch failed.
    #[error("Failed to push to the deploy branch: {0}")]
    Push(StepError),
}
