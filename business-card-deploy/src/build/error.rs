//! Build error types.

use crate::steps::StepError;
use thiserror::Error;

/// Errors that can occur while building the page.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The publish root could not be reset.
    #[error("Failed to prepare '{path}': {source}")]
    Workspace {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The generator input is missing.
    #[error("Missing generator input: {path}")]
    MissingData { path: String },

    /// The generator exited unsuccessfully.
    #[error(transparent)]
    Generator(#[from] StepError),

    /// The generator succeeded but produced no page.
    #[error("Generator produced no output at '{path}'")]
    EmptyOutput { path: String },
}
