//! Recording runner for unit tests.

use super::{CommandRunner, Step, StepError};
use std::sync::Mutex;

/// Records every step instead of running it.
///
/// Steps with a stdout redirection get `output` written to their target, so
/// downstream checks see a generated file.
pub(crate) struct RecordingRunner {
    calls: Mutex<Vec<Step>>,
    output: String,
    fail_on: Option<String>,
}

impl Default for RecordingRunner {
    fn default() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            output: "<html></html>".to_string(),
            fail_on: None,
        }
    }
}

impl RecordingRunner {
    /// Fails the first step that has `arg` among its arguments.
    pub(crate) fn failing_on(arg: &str) -> Self {
        Self {
            fail_on: Some(arg.to_string()),
            ..Default::default()
        }
    }

    /// Writes `output` for redirected steps.
    pub(crate) fn with_output(output: &str) -> Self {
        Self {
            output: output.to_string(),
            ..Default::default()
        }
    }

    pub(crate) fn calls(&self) -> Vec<Step> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&self, step: &Step) -> Result<(), StepError> {
        self.calls.lock().unwrap().push(step.clone());

        if self.fail_on.as_deref().is_some_and(|arg| step.has_arg(arg)) {
            return Err(StepError::Failed {
                command: step.to_string(),
                code: Some(1),
                stderr: "simulated failure".to_string(),
            });
        }

        if let Some(path) = step.stdout() {
            std::fs::write(path, &self.output).unwrap();
        }
        Ok(())
    }
}
