//! Raw action inputs.

/// Inputs as handed to the action, before defaults and validation.
///
/// Blank values are treated the same as missing ones, matching how the
/// runner exposes inputs that were declared but left empty.
#[derive(Debug, Clone, Default)]
pub struct ActionInputs {
    /// Personal access token used to push the build.
    pub access_token: Option<String>,

    /// Branch that receives the build output.
    pub deploy_branch: Option<String>,

    /// Version pin for the generator package.
    pub builder_script_version: Option<String>,

    /// Repository name to deploy to, under the triggering repository's owner.
    pub deploy_repo: Option<String>,

    /// Endpoint notified once the build has been pushed.
    pub on_done_webhook_url: Option<String>,
}

/// Trims an input, mapping blank values to `None`.
pub(crate) fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}
