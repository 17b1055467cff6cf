//! Filesystem port for manifest, snapshot, and source I/O.

use std::path::{Path, PathBuf};

use super::PortError;

/// Provides filesystem access for reading, writing, and walking files.
pub trait FileSystem: Send + Sync {
    /// Reads the entire contents of a file as text. Invalid UTF-8 sequences
    /// are replaced with `U+FFFD`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be read.
    fn read_to_string(&self, path: &Path) -> Result<String, PortError>;

    /// Writes the given contents to a file, creating parent directories and
    /// replacing any existing content.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails (permissions, disk full, etc.).
    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError>;

    /// Returns `true` if the path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Recursively lists every regular file below `root`. Entries that cannot
    /// be read are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `root` itself cannot be opened.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>, PortError>;
}
