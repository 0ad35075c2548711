//! Subprocess steps and the runner that executes them.
//!
//! Each external command is described as a [`Step`] declaring its program,
//! arguments, working directory and redirections. Steps run strictly in
//! order; the first failure stops the sequence.
//!
//! No timeout is applied: a hanging subprocess blocks the run.

mod error;
mod step;
#[cfg(test)]
pub(crate) mod testing;

pub use error::StepError;
pub use step::Step;

use std::process::Stdio;
use tokio::fs::File;
use tokio::process::Command;
use tracing::{debug, info};

/// Executes steps.
///
/// Implemented by [`ProcessRunner`] for real processes; tests substitute a
/// recording implementation.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    /// Runs a single step to completion.
    async fn run(&self, step: &Step) -> Result<(), StepError>;
}

/// Runs steps as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    async fn run(&self, step: &Step) -> Result<(), StepError> {
        let command_line = step.to_string();
        let spawn_error = |source| StepError::Spawn {
            command: command_line.clone(),
            source,
        };

        let mut command = Command::new(step.program());
        command
            .args(step.args())
            .current_dir(step.cwd())
            .stderr(Stdio::piped());

        match step.stdin() {
            Some(path) => {
                let file = File::open(path).await.map_err(spawn_error)?;
                command.stdin(Stdio::from(file.into_std().await))
            }
            None => command.stdin(Stdio::null()),
        };
        match step.stdout() {
            Some(path) => {
                let file = File::create(path).await.map_err(spawn_error)?;
                command.stdout(Stdio::from(file.into_std().await))
            }
            None => command.stdout(Stdio::piped()),
        };

        let output = command.output().await.map_err(spawn_error)?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        if !stdout.trim().is_empty() {
            debug!(command = %command_line, stdout = %step.redact(stdout.trim()), "Command output");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StepError::Failed {
                command: command_line,
                code: output.status.code(),
                // git echoes remote URLs in its errors.
                stderr: step.redact(stderr.trim()),
            });
        }

        Ok(())
    }
}

/// Runs `steps` in order, stopping at the first failure.
///
/// # Errors
///
/// Returns the [`StepError`] of the first step that fails. Later steps are
/// not attempted.
pub async fn run_steps<R: CommandRunner>(runner: &R, steps: &[Step]) -> Result<(), StepError> {
    for step in steps {
        info!(command = %step, cwd = %step.cwd().display(), "Running");
        runner.run(step).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingRunner;
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn run_steps_stops_at_first_failure() {
        let runner = RecordingRunner::failing_on("second");
        let steps = vec![
            Step::new("git", ["first"], "."),
            Step::new("git", ["second"], "."),
            Step::new("git", ["third"], "."),
        ];

        let result = run_steps(&runner, &steps).await;

        assert!(matches!(result, Err(StepError::Failed { .. })));
        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert!(calls[1].has_arg("second"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn process_runner_redirects_stdin_and_stdout() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("in.json");
        let output = temp.path().join("out.html");
        std::fs::write(&input, "{\"name\":\"Ada\"}").unwrap();

        let step = Step::new("cat", Vec::<String>::new(), temp.path())
            .with_stdin(&input)
            .with_stdout(&output);
        ProcessRunner.run(&step).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "{\"name\":\"Ada\"}"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn process_runner_reports_exit_code_and_masked_stderr() {
        let temp = TempDir::new().unwrap();
        let step = Step::new("sh", ["-c", "echo 'cannot reach s3cret' >&2; exit 3"], temp.path())
            .with_secret("s3cret");

        let error = ProcessRunner.run(&step).await.unwrap_err();

        match error {
            StepError::Failed {
                code,
                stderr,
                command,
            } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "cannot reach ***");
                assert!(!command.contains("s3cret"));
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn process_runner_reports_missing_program() {
        let temp = TempDir::new().unwrap();
        let step = Step::new("definitely-not-a-real-program-4821", ["x"], temp.path());

        let error = ProcessRunner.run(&step).await.unwrap_err();
        assert!(matches!(error, StepError::Spawn { .. }));
    }
}
