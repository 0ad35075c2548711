//! A single subprocess invocation.

use std::fmt;
use std::path::{Path, PathBuf};

/// One external command, with everything it needs declared up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    program: String,
    args: Vec<String>,
    cwd: PathBuf,
    stdin: Option<PathBuf>,
    stdout: Option<PathBuf>,
    secret: Option<String>,
}

impl Step {
    /// Creates a step running `program` with `args` inside `cwd`.
    pub fn new<I, S>(program: &str, args: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.to_string(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
            stdin: None,
            stdout: None,
            secret: None,
        }
    }

    /// Feeds the contents of `path` to the process' stdin.
    pub fn with_stdin(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdin = Some(path.into());
        self
    }

    /// Writes the process' stdout to `path`, truncating it.
    pub fn with_stdout(mut self, path: impl Into<PathBuf>) -> Self {
        self.stdout = Some(path.into());
        self
    }

    /// Masks `secret` wherever the step is displayed.
    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn stdin(&self) -> Option<&Path> {
        self.stdin.as_deref()
    }

    pub fn stdout(&self) -> Option<&Path> {
        self.stdout.as_deref()
    }

    /// Returns true if any argument equals `arg`.
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }

    /// Replaces the step's secret in `value` with `***`.
    pub fn redact(&self, value: &str) -> String {
        match self.secret.as_deref() {
            Some(secret) if !secret.is_empty() => value.replace(secret, "***"),
            _ => value.to_string(),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", self.redact(arg))?;
        }
        if let Some(stdin) = &self.stdin {
            write!(f, " < {}", stdin.display())?;
        }
        if let Some(stdout) = &self.stdout {
            write!(f, " > {}", stdout.display())?;
        }
        Ok(())
    }
}
