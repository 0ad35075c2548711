#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod assets;
pub mod build;
pub mod config;
pub mod context;
pub mod publish;
pub mod runner;
pub mod steps;
pub mod webhook;
pub mod workspace;

pub use assets::{copy_custom_domain, AssetError};
pub use build::{build_site, generator_step, BuildError, GENERATOR_PACKAGE};
pub use config::{
    ActionInputs, ConfigError, DeployConfig, DEFAULT_BUILDER_SCRIPT_VERSION,
    DEFAULT_DEPLOY_BRANCH,
};
pub use context::{ContextError, DeployTarget, GitHubContext, RepositorySlug};
pub use publish::{commit_message, publish, publish_steps, PublishError};
pub use runner::{DeployError, DeployOutcome, DeployReport, Deployer};
pub use steps::{run_steps, CommandRunner, ProcessRunner, Step, StepError};
pub use webhook::{
    notify, Notification, PendingNotification, WebhookEndpoint, WebhookError, WebhookPayload,
};
pub use workspace::Workspace;
