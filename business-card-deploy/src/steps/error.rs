//! Step error types.

use thiserror::Error;

/// Errors that can occur while running a subprocess step.
#[derive(Debug, Error)]
pub enum StepError {
    /// The process could not be started, or its redirections could not be opened.
    #[error("Failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The process ran but exited unsuccessfully.
    #[error("{command} failed with exit code {exit}: {stderr}", exit = display_code(.code))]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "none (terminated by signal)".to_string(), |c| c.to_string())
}
