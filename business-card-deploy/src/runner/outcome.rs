//! Result of a deploy run.

use crate::context::DeployTarget;
use crate::webhook::Notification;

/// What a successful run did.
#[derive(Debug)]
pub enum DeployOutcome {
    /// The run was triggered by the deploy branch itself; nothing was done.
    Skipped {
        /// Ref that triggered the run.
        git_ref: String,
    },

    /// The page was built and pushed.
    Deployed(DeployReport),
}

/// Details of a completed deploy.
#[derive(Debug)]
pub struct DeployReport {
    /// Repository that received the build.
    pub target: DeployTarget,

    /// Branch that received the build.
    pub branch: String,

    /// Whether a CNAME file was published.
    pub cname_copied: bool,

    /// Completion webhook, possibly still in flight.
    pub notification: Notification,
}

impl DeployOutcome {
    /// Returns true if the run built and pushed the page.
    #[must_use]
    pub fn is_deployed(&self) -> bool {
        matches!(self, Self::Deployed(_))
    }
}
