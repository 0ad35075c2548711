//! Action input resolution.
//!
//! Inputs are resolved exactly once, before anything touches the filesystem
//! or the network. The resulting [`DeployConfig`] is immutable.

mod error;
mod inputs;

pub use error::ConfigError;
pub use inputs::ActionInputs;

use bstr::ByteSlice;
use inputs::normalize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Branch deployed to when `deploy-branch` is not set.
pub const DEFAULT_DEPLOY_BRANCH: &str = "master";

/// Generator version used when `builder-script-version` is not set.
pub const DEFAULT_BUILDER_SCRIPT_VERSION: &str = "latest";

/// Resolved configuration for a single deploy run.
#[derive(Clone)]
pub struct DeployConfig {
    /// Token embedded in the push URL.
    access_token: String,
    /// Branch that receives the build output.
    deploy_branch: String,
    /// Version pin for the generator package.
    builder_script_version: String,
    /// Optional override for the target repository name.
    deploy_repo: Option<String>,
    /// Optional completion webhook.
    on_done_webhook_url: Option<String>,
    /// Directory containing `data.json`, `CNAME` and `public/`.
    workspace_root: PathBuf,
}

impl DeployConfig {
    /// Applies defaults to the raw inputs and validates them.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingAccessToken`] if no token was given, or a
    /// validation error if the deploy branch or generator version is unusable.
    pub fn resolve(inputs: ActionInputs) -> Result<Self, ConfigError> {
        let access_token =
            normalize(inputs.access_token.as_deref()).ok_or(ConfigError::MissingAccessToken)?;

        let deploy_branch = normalize(inputs.deploy_branch.as_deref())
            .unwrap_or_else(|| DEFAULT_DEPLOY_BRANCH.to_string());
        validate_branch(&deploy_branch)?;

        let builder_script_version = normalize(inputs.builder_script_version.as_deref())
            .unwrap_or_else(|| DEFAULT_BUILDER_SCRIPT_VERSION.to_string());
        if builder_script_version.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidBuilderVersion {
                version: builder_script_version,
            });
        }

        let config = Self {
            access_token,
            deploy_branch,
            builder_script_version,
            deploy_repo: normalize(inputs.deploy_repo.as_deref()),
            on_done_webhook_url: normalize(inputs.on_done_webhook_url.as_deref()),
            workspace_root: PathBuf::from("."),
        };
        debug!(?config, "Resolved configuration");
        Ok(config)
    }

    /// Sets the directory the fixed relative paths resolve against.
    pub fn with_workspace_root(mut self, workspace_root: PathBuf) -> Self {
        self.workspace_root = workspace_root;
        self
    }

    /// Returns the access token.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the branch that receives the build output.
    pub fn deploy_branch(&self) -> &str {
        &self.deploy_branch
    }

    /// Returns the fully qualified ref of the deploy branch.
    pub fn deploy_ref(&self) -> String {
        format!("refs/heads/{}", self.deploy_branch)
    }

    /// Returns the generator version pin.
    pub fn builder_script_version(&self) -> &str {
        &self.builder_script_version
    }

    /// Returns the target repository override, if any.
    pub fn deploy_repo(&self) -> Option<&str> {
        self.deploy_repo.as_deref()
    }

    /// Returns the completion webhook URL, if any.
    pub fn on_done_webhook_url(&self) -> Option<&str> {
        self.on_done_webhook_url.as_deref()
    }

    /// Returns the workspace root.
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }
}

// Hand-written so the token never reaches the logs.
impl std::fmt::Debug for DeployConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeployConfig")
            .field("access_token", &"***")
            .field("deploy_branch", &self.deploy_branch)
            .field("builder_script_version", &self.builder_script_version)
            .field("deploy_repo", &self.deploy_repo)
            .field("on_done_webhook_url", &self.on_done_webhook_url)
            .field("workspace_root", &self.workspace_root)
            .finish()
    }
}

fn validate_branch(branch: &str) -> Result<(), ConfigError> {
    let full = format!("refs/heads/{branch}");
    gix_validate::reference::name(full.as_bytes().as_bstr())
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidDeployBranch {
            branch: branch.to_string(),
            message: e.to_string(),
        })
}
