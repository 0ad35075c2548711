//! Workflow context of the triggering event.
//!
//! The context is passed in explicitly rather than read from globals, so the
//! pipeline can run against any ref, actor or repository.

mod error;
mod target;

pub use error::ContextError;
pub use target::{DeployTarget, GIT_HOST};

use serde::Serialize;
use std::fmt;

/// Repository identifier in `owner/name` form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositorySlug {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl RepositorySlug {
    /// Parses an `owner/name` string.
    ///
    /// # Errors
    ///
    /// Returns [`ContextError::InvalidRepository`] unless the value has exactly
    /// one `/` separating two non-empty parts.
    pub fn parse(value: &str) -> Result<Self, ContextError> {
        let invalid = || ContextError::InvalidRepository {
            value: value.to_string(),
        };

        let (owner, name) = value.trim().split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }
}

impl fmt::Display for RepositorySlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// The event that triggered the run.
#[derive(Debug, Clone)]
pub struct GitHubContext {
    /// Fully qualified ref that was pushed, e.g. `refs/heads/main`.
    pub git_ref: String,

    /// Commit that triggered the run.
    pub sha: String,

    /// Login of the user that triggered the run.
    pub actor: String,

    /// Repository the workflow runs in.
    pub repository: RepositorySlug,
}

impl GitHubContext {
    /// Returns true if this run was triggered by a push to `deploy_ref`.
    ///
    /// Such pushes are our own deploys; acting on them would loop forever.
    #[must_use]
    pub fn is_triggered_by(&self, deploy_ref: &str) -> bool {
        self.git_ref == deploy_ref
    }

    /// No-reply address used as the commit author email.
    #[must_use]
    pub fn actor_email(&self) -> String {
        format!("{}@users.noreply.{GIT_HOST}", self.actor)
    }
}
