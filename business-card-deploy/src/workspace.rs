//! Fixed file layout of the action's workspace.

use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Input handed to the generator.
pub const DATA_FILE: &str = "data.json";

/// Optional custom domain marker.
pub const CNAME_FILE: &str = "CNAME";

/// Publish root; its contents become the deploy branch.
pub const PUBLIC_DIR: &str = "public";

/// Page written by the generator.
pub const ENTRY_FILE: &str = "index.html";

/// Paths used by a run, all relative to a single root.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Creates a workspace rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn data_file(&self) -> PathBuf {
        self.root.join(DATA_FILE)
    }

    pub fn cname_file(&self) -> PathBuf {
        self.root.join(CNAME_FILE)
    }

    pub fn public_dir(&self) -> PathBuf {
        self.root.join(PUBLIC_DIR)
    }

    pub fn entry_file(&self) -> PathBuf {
        self.public_dir().join(ENTRY_FILE)
    }

    pub fn published_cname(&self) -> PathBuf {
        self.public_dir().join(CNAME_FILE)
    }

    /// Deletes the publish root, if present, and recreates it empty.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if removal or creation fails.
    pub async fn reset_public_dir(&self) -> io::Result<()> {
        let public = self.public_dir();
        match tokio::fs::remove_dir_all(&public).await {
            Ok(()) => debug!(path = %public.display(), "Removed previous publish root"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        tokio::fs::create_dir_all(&public).await
    }
}
