//! Page generation.
//!
//! The page is produced by an external npm package run through `npx`, fed
//! `data.json` on stdin and writing HTML to stdout.

mod error;

pub use error::BuildError;

use crate::steps::{run_steps, CommandRunner, Step};
use crate::workspace::Workspace;
use std::path::PathBuf;
use tracing::info;

/// npm package that renders the page.
pub const GENERATOR_PACKAGE: &str = "business-card-builder-html-gen";

/// Describes the generator invocation for `version`.
#[must_use]
pub fn generator_step(workspace: &Workspace, version: &str) -> Step {
    Step::new(
        "npx",
        ["--yes".to_string(), format!("{GENERATOR_PACKAGE}@{version}")],
        workspace.root(),
    )
    .with_stdin(workspace.data_file())
    .with_stdout(workspace.entry_file())
}

/// Resets the publish root and renders the page into it.
///
/// Returns the path of the generated page.
///
/// # Errors
///
/// Returns [`BuildError`] if the publish root cannot be reset, `data.json` is
/// missing, the generator fails, or the generated page is empty.
pub async fn build_site<R: CommandRunner>(
    runner: &R,
    workspace: &Workspace,
    version: &str,
) -> Result<PathBuf, BuildError> {
    info!("Cleaning public folder...");
    workspace
        .reset_public_dir()
        .await
        .map_err(|e| BuildError::Workspace {
            path: workspace.public_dir().display().to_string(),
            source: e,
        })?;

    let data_file = workspace.data_file();
    if !data_file.is_file() {
        return Err(BuildError::MissingData {
            path: data_file.display().to_string(),
        });
    }

    info!(version, "Building with {GENERATOR_PACKAGE}");
    run_steps(runner, &[generator_step(workspace, version)]).await?;

    let entry_file = workspace.entry_file();
    let size = tokio::fs::metadata(&entry_file)
        .await
        .map(|m| m.len())
        .unwrap_or(0);
    if size == 0 {
        return Err(BuildError::EmptyOutput {
            path: entry_file.display().to_string(),
        });
    }

    info!(bytes = size, "Finished building your site.");
    Ok(entry_file)
}
