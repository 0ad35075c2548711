//! Runner error types.

use thiserror::Error;

/// Errors that abort a deploy run.
///
/// The message is always the underlying error's, so it can be reported as
/// the run's failure reason as-is.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Inputs could not be resolved.
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),

    /// Building the page failed.
    #[error(transparent)]
    Build(#[from] crate::build::BuildError),

    /// Copying optional assets failed.
    #[error(transparent)]
    Asset(#[from] crate::assets::AssetError),

    /// Committing or pushing failed.
    #[error(transparent)]
    Publish(#[from] crate::publish::PublishError),
}
