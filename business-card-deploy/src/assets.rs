//! Optional files copied next to the generated page.

use crate::workspace::Workspace;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while copying assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Checking whether a file exists failed.
    #[error("Failed to inspect '{path}': {source}")]
    Inspect {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Copying a file into the publish root failed.
    #[error("Failed to copy '{from}' to '{to}': {source}")]
    Copy {
        from: String,
        to: String,
        #[source]
        source: std::io::Error,
    },
}

/// Copies the custom domain marker into the publish root, if there is one.
///
/// Returns whether a file was copied. An existing `public/CNAME` is overwritten.
///
/// # Errors
///
/// Returns [`AssetError::Inspect`] if the marker's presence cannot be
/// determined, or [`AssetError::Copy`] if it exists but cannot be copied.
pub async fn copy_custom_domain(workspace: &Workspace) -> Result<bool, AssetError> {
    let source = workspace.cname_file();
    let exists = tokio::fs::try_exists(&source)
        .await
        .map_err(|e| AssetError::Inspect {
            path: source.display().to_string(),
            source: e,
        })?;
    if !exists {
        debug!("No CNAME file, skipping");
        return Ok(false);
    }

    info!("Copying CNAME over.");
    let target = workspace.published_cname();
    tokio::fs::copy(&source, &target)
        .await
        .map_err(|e| AssetError::Copy {
            from: source.display().to_string(),
            to: target.display().to_string(),
            source: e,
        })?;
    info!("Finished copying CNAME.");
    Ok(true)
}
