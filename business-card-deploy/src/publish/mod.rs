//! Publishing the publish root to the deploy branch.
//!
//! Every run starts a brand new repository inside `public/` and force-pushes
//! a single commit. The deploy branch's history is replaced, never merged.

mod error;

pub use error::PublishError;

use crate::config::DeployConfig;
use crate::context::{DeployTarget, GitHubContext};
use crate::steps::{CommandRunner, Step};
use crate::workspace::Workspace;
use tracing::{info, info_span, Instrument};

/// Branch the fresh repository commits to before pushing.
pub const LOCAL_BRANCH: &str = "master";

/// Commit message for the deploy commit.
#[must_use]
pub fn commit_message(sha: &str) -> String {
    format!("deployed via Business Card Builder GitHub Action 🎩 for {sha}")
}

/// Describes the git commands that publish the build, in order.
#[must_use]
pub fn publish_steps(
    workspace: &Workspace,
    context: &GitHubContext,
    target: &DeployTarget,
    config: &DeployConfig,
) -> Vec<Step> {
    let cwd = workspace.public_dir();
    let git = |args: Vec<String>| Step::new("git", args, &cwd);

    vec![
        git(vec![
            "init".into(),
            format!("--initial-branch={LOCAL_BRANCH}"),
        ]),
        git(vec!["config".into(), "user.name".into(), context.actor.clone()]),
        git(vec![
            "config".into(),
            "user.email".into(),
            context.actor_email(),
        ]),
        git(vec!["add".into(), ".".into()]),
        git(vec!["commit".into(), "-m".into(), commit_message(&context.sha)]),
        git(vec![
            "push".into(),
            "-f".into(),
            target.push_url(config.access_token()),
            format!("{LOCAL_BRANCH}:{}", config.deploy_branch()),
        ])
        .with_secret(config.access_token()),
    ]
}

/// Commits the publish root and force-pushes it to the deploy branch.
///
/// # Errors
///
/// Returns [`PublishError`] for the first git command that fails; the
/// remaining commands are not run.
pub async fn publish<R: CommandRunner>(
    runner: &R,
    workspace: &Workspace,
    context: &GitHubContext,
    target: &DeployTarget,
    config: &DeployConfig,
) -> Result<(), PublishError> {
    let span = info_span!(
        "publish",
        repo = %target.full_name,
        branch = %config.deploy_branch()
    );

    async {
        info!(url = %target.redacted_push_url(), "Deploying");

        for step in publish_steps(workspace, context, target, config) {
            info!(command = %step, "Running");
            if let Err(e) = runner.run(&step).await {
                return Err(if step.args().first().is_some_and(|a| a == "push") {
                    PublishError::Push(e)
                } else {
                    PublishError::Git(e)
                });
            }
        }

        info!("Finished deploying your site.");
        Ok(())
    }
    .instrument(span)
    .await
}
