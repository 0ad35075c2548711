//! Deploy target resolution.

use super::GitHubContext;
use crate::config::DeployConfig;
use serde::Serialize;

/// Host the build is pushed to.
pub const GIT_HOST: &str = "github.com";

/// Repository that receives the build output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeployTarget {
    /// Repository owner, always taken from the triggering repository.
    pub owner: String,

    /// Repository name.
    pub name: String,

    /// Full repository name in "owner/name" format.
    pub full_name: String,
}

impl DeployTarget {
    /// Picks the target repository for a run.
    ///
    /// The owner comes from the triggering repository. The name is the
    /// `deploy-repo` input when set, otherwise the triggering repository's own.
    #[must_use]
    pub fn resolve(context: &GitHubContext, config: &DeployConfig) -> Self {
        let owner = context.repository.owner.clone();
        let name = config
            .deploy_repo()
            .unwrap_or(&context.repository.name)
            .to_string();
        Self {
            full_name: format!("{owner}/{name}"),
            owner,
            name,
        }
    }

    /// Builds the authenticated HTTPS push URL.
    #[must_use]
    pub fn push_url(&self, token: &str) -> String {
        format!("https://{token}@{GIT_HOST}/{}.git", self.full_name)
    }

    /// Push URL with the credential masked, for logging.
    #[must_use]
    pub fn redacted_push_url(&self) -> String {
        self.push_url("***")
    }
}
