//! Orchestrates a deploy run.

mod error;
mod outcome;

pub use error::DeployError;
pub use outcome::{DeployOutcome, DeployReport};

use crate::assets::copy_custom_domain;
use crate::build::build_site;
use crate::config::{ActionInputs, DeployConfig};
use crate::context::{DeployTarget, GitHubContext};
use crate::publish::publish;
use crate::steps::CommandRunner;
use crate::webhook::Notification;
use crate::workspace::Workspace;
use tracing::{info, info_span, Instrument};

/// Runs the build-and-publish pipeline for one triggering event.
pub struct Deployer<R> {
    config: DeployConfig,
    context: GitHubContext,
    runner: R,
}

impl<R: CommandRunner> Deployer<R> {
    /// Creates a deployer from an already resolved configuration.
    pub fn new(config: DeployConfig, context: GitHubContext, runner: R) -> Self {
        Self {
            config,
            context,
            runner,
        }
    }

    /// Resolves `inputs` and creates a deployer rooted at the current directory.
    ///
    /// # Errors
    ///
    /// Returns [`DeployError::Config`] if the inputs are invalid, in particular
    /// when no access token was provided. Nothing has been touched at that point.
    pub fn from_inputs(
        inputs: ActionInputs,
        context: GitHubContext,
        runner: R,
    ) -> Result<Self, DeployError> {
        Ok(Self::new(DeployConfig::resolve(inputs)?, context, runner))
    }

    /// Overrides the directory holding `data.json`, `CNAME` and `public/`.
    pub fn with_workspace_root(mut self, root: std::path::PathBuf) -> Self {
        self.config = self.config.with_workspace_root(root);
        self
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Executes the full pipeline.
    ///
    /// Steps run strictly in order: guard, build, CNAME copy, publish,
    /// webhook dispatch. The webhook is not awaited.
    ///
    /// # Errors
    ///
    /// Returns the first [`DeployError`] encountered. Side effects of steps
    /// that already completed are left in place.
    pub async fn run(&self) -> Result<DeployOutcome, DeployError> {
        let span = info_span!(
            "deploy",
            repo = %self.context.repository,
            git_ref = %self.context.git_ref
        );

        async {
            let deploy_ref = self.config.deploy_ref();
            if self.context.is_triggered_by(&deploy_ref) {
                info!(
                    "Triggered by branch used to deploy: {}.",
                    self.context.git_ref
                );
                info!("Nothing to deploy.");
                return Ok(DeployOutcome::Skipped {
                    git_ref: self.context.git_ref.clone(),
                });
            }

            let workspace = Workspace::new(self.config.workspace_root());
            build_site(
                &self.runner,
                &workspace,
                self.config.builder_script_version(),
            )
            .await?;

            let cname_copied = copy_custom_domain(&workspace).await?;

            let target = DeployTarget::resolve(&self.context, &self.config);
            info!("Ready to deploy your new shiny site!");
            info!(
                "Deploying to repo: {} and branch: {}",
                target.full_name,
                self.config.deploy_branch()
            );
            publish(
                &self.runner,
                &workspace,
                &self.context,
                &target,
                &self.config,
            )
            .await?;

            let notification =
                Notification::dispatch(self.config.on_done_webhook_url(), &target.full_name);

            info!("Enjoy! ✨");
            Ok(DeployOutcome::Deployed(DeployReport {
                target,
                branch: self.config.deploy_branch().to_string(),
                cname_copied,
                notification,
            }))
        }
        .instrument(span)
        .await
    }
}
