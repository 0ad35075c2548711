//! CLI for the business card deploy action.
//!
//! Builds the page from `data.json`, pushes it to the deploy branch and
//! notifies the completion webhook. Inputs follow the GitHub Actions
//! `INPUT_<NAME>` convention so the binary can run directly as an action step.

use business_card_deploy::{
    ActionInputs, DeployConfig, DeployOutcome, Deployer, GitHubContext, ProcessRunner,
    RepositorySlug,
};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Business Card Deploy - Build a business card page and publish it to a deploy branch.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Personal access token used to push the build.
    #[arg(long, env = "INPUT_ACCESS-TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Branch that receives the build [default: master].
    #[arg(long, env = "INPUT_DEPLOY-BRANCH")]
    deploy_branch: Option<String>,

    /// Version of the page generator package [default: latest].
    #[arg(long, env = "INPUT_BUILDER-SCRIPT-VERSION")]
    builder_script_version: Option<String>,

    /// Repository to deploy to, under the same owner [default: current repository].
    #[arg(long, env = "INPUT_DEPLOY-REPO")]
    deploy_repo: Option<String>,

    /// URL notified after a successful deploy.
    #[arg(long, env = "INPUT_ON-DONE-WEBHOOK-URL")]
    on_done_webhook_url: Option<String>,

    /// Ref that triggered the workflow.
    #[arg(long = "ref", env = "GITHUB_REF")]
    git_ref: String,

    /// Commit that triggered the workflow.
    #[arg(long, env = "GITHUB_SHA")]
    sha: String,

    /// User that triggered the workflow.
    #[arg(long, env = "GITHUB_ACTOR")]
    actor: String,

    /// Repository the workflow runs in, as owner/name.
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: String,

    /// Directory containing data.json and CNAME.
    #[arg(long, default_value = ".")]
    workspace: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    let deployer = match prepare(args) {
        Ok(deployer) => deployer,
        Err(failure) => {
            report_failure(&failure.message);
            return ExitCode::from(failure.code);
        }
    };

    let outcome = match deployer.run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            report_failure(&e.to_string());
            return ExitCode::from(1);
        }
    };

    // Like a job that stays alive until its last request finishes: the
    // deploy is done, but a failed notification still fails the step.
    if let DeployOutcome::Deployed(report) = outcome {
        info!(
            repo = %report.target.full_name,
            branch = %report.branch,
            cname = report.cname_copied,
            "Deploy complete"
        );
        if let Err(e) = report.notification.settle().await {
            report_failure(&e.to_string());
            return ExitCode::from(1);
        }
    }

    ExitCode::SUCCESS
}

/// A failure before the pipeline starts.
#[derive(Debug)]
struct StartupFailure {
    code: u8,
    message: String,
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Resolves inputs and context into a deployer.
///
/// Inputs are resolved first, so a missing token is reported even when the
/// context is broken too.
fn prepare(args: Args) -> Result<Deployer<ProcessRunner>, StartupFailure> {
    let inputs = ActionInputs {
        access_token: args.access_token,
        deploy_branch: args.deploy_branch,
        builder_script_version: args.builder_script_version,
        deploy_repo: args.deploy_repo,
        on_done_webhook_url: args.on_done_webhook_url,
    };
    let config = DeployConfig::resolve(inputs).map_err(|e| StartupFailure {
        code: 1,
        message: e.to_string(),
    })?;

    let repository = RepositorySlug::parse(&args.repository).map_err(|e| StartupFailure {
        code: 2,
        message: e.to_string(),
    })?;
    let context = GitHubContext {
        git_ref: args.git_ref,
        sha: args.sha,
        actor: args.actor,
        repository,
    };

    Ok(Deployer::new(
        config.with_workspace_root(args.workspace),
        context,
        ProcessRunner,
    ))
}

/// Logs a failure and flags it as a workflow error annotation.
fn report_failure(message: &str) {
    error!(error = %message, "Run failed");
    println!("::error::{}", escape_workflow_data(message));
}

/// Escapes a message for use as workflow command data.
fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_multiline_messages() {
        assert_eq!(
            escape_workflow_data("git push failed: 50%\nfatal: denied"),
            "git push failed: 50%25%0Afatal: denied"
        );
    }

    fn args(token: Option<&str>, repository: &str) -> Args {
        let mut argv = vec![
            "business-card-deploy".to_string(),
            "--ref=refs/heads/main".to_string(),
            "--sha=3f2a9c1".to_string(),
            "--actor=octocat".to_string(),
            format!("--repository={repository}"),
        ];
        if let Some(token) = token {
            argv.push(format!("--access-token={token}"));
        }
        temp_env::with_vars_unset(
            [
                "INPUT_ACCESS-TOKEN",
                "INPUT_DEPLOY-BRANCH",
                "INPUT_BUILDER-SCRIPT-VERSION",
                "INPUT_DEPLOY-REPO",
                "INPUT_ON-DONE-WEBHOOK-URL",
            ],
            || Args::try_parse_from(argv).unwrap(),
        )
    }

    #[test]
    fn missing_token_is_reported_before_bad_repository() {
        let failure = prepare(args(None, "not-a-slug")).err().unwrap();

        assert_eq!(failure.code, 1);
        assert!(failure.message.starts_with("No personal access token found."));
    }

    #[test]
    fn bad_repository_exits_with_code_2() {
        let failure = prepare(args(Some("abc"), "not-a-slug")).err().unwrap();

        assert_eq!(failure.code, 2);
        assert!(failure.message.contains("not-a-slug"));
    }

    #[test]
    fn prepares_deployer_from_valid_args() {
        let deployer = prepare(args(Some("abc"), "owner/repo")).ok().unwrap();

        assert_eq!(deployer.config().access_token(), "abc");
        assert_eq!(deployer.config().deploy_branch(), "master");
    }

    #[test]
    fn reads_inputs_from_action_environment() {
        temp_env::with_vars(
            [
                ("INPUT_ACCESS-TOKEN", Some("abc")),
                ("INPUT_DEPLOY-BRANCH", Some("gh-pages")),
                ("GITHUB_REF", Some("refs/heads/main")),
                ("GITHUB_SHA", Some("3f2a9c1")),
                ("GITHUB_ACTOR", Some("octocat")),
                ("GITHUB_REPOSITORY", Some("owner/repo")),
            ],
            || {
                let args = Args::try_parse_from(["business-card-deploy"]).unwrap();
                assert_eq!(args.access_token.as_deref(), Some("abc"));
                assert_eq!(args.deploy_branch.as_deref(), Some("gh-pages"));
                assert_eq!(args.git_ref, "refs/heads/main");
                assert_eq!(args.repository, "owner/repo");
                assert_eq!(args.workspace, PathBuf::from("."));
            },
        );
    }
}
