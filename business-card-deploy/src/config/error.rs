//! Configuration error types.

use thiserror::Error;

/// Errors that can occur while resolving action inputs.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The `access-token` input was not provided.
    #[error(
        "No personal access token found. Please provide one by setting the `access-token` input for this action."
    )]
    MissingAccessToken,

    /// The deploy branch does not form a valid git reference.
    #[error("Invalid deploy branch '{branch}': {message}")]
    InvalidDeployBranch { branch: String, message: String },

    /// The builder script version cannot be used as a package version pin.
    #[error("Invalid builder script version '{version}': must not contain whitespace")]
    InvalidBuilderVersion { version: String },
}
