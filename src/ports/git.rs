//! Git repository port for working-tree change detection.

use std::path::Path;

use super::PortError;

/// Provides read access to a git working tree.
pub trait GitRepo: Send + Sync {
    /// Returns `git status --porcelain` output restricted to `path`.
    ///
    /// An empty string means the path has no uncommitted changes.
    ///
    /// # Errors
    ///
    /// Returns an error if git is unavailable or `path` is not inside a
    /// repository.
    fn status_porcelain(&self, path: &Path) -> Result<String, PortError>;
}
