//! In-memory filesystem.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::ports::filesystem::FileSystem;
use crate::ports::PortError;

#[derive(Default)]
struct State {
    files: BTreeMap<PathBuf, String>,
    unreadable: BTreeSet<PathBuf>,
    read_only: BTreeSet<PathBuf>,
    writes: usize,
}

/// Filesystem held in a map keyed by path.
///
/// Directories exist implicitly whenever some file lives below them.
#[derive(Clone, Default)]
pub struct MemoryFileSystem {
    state: Arc<Mutex<State>>,
}

impl MemoryFileSystem {
    /// Creates an empty filesystem.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, returning `self` for chaining.
    #[must_use]
    pub fn with_file(self, path: impl Into<PathBuf>, contents: &str) -> Self {
        self.insert(path, contents);
        self
    }

    /// Adds or replaces a file.
    pub fn insert(&self, path: impl Into<PathBuf>, contents: &str) {
        let mut state = self.state.lock().expect("fs lock poisoned");
        state.files.insert(path.into(), contents.to_string());
    }

    /// Removes a file if present.
    pub fn remove(&self, path: &Path) {
        let mut state = self.state.lock().expect("fs lock poisoned");
        state.files.remove(path);
    }

    /// Makes reads of `path` fail while leaving it visible to walks.
    pub fn mark_unreadable(&self, path: impl Into<PathBuf>) {
        let mut state = self.state.lock().expect("fs lock poisoned");
        state.unreadable.insert(path.into());
    }

    /// Makes writes to `path` fail.
    pub fn fail_writes_to(&self, path: impl Into<PathBuf>) {
        let mut state = self.state.lock().expect("fs lock poisoned");
        state.read_only.insert(path.into());
    }

    /// Returns the current contents of `path`, if any.
    #[must_use]
    pub fn get(&self, path: &Path) -> Option<String> {
        let state = self.state.lock().expect("fs lock poisoned");
        state.files.get(path).cloned()
    }

    /// Number of successful `write` calls so far.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.state.lock().expect("fs lock poisoned").writes
    }
}

impl FileSystem for MemoryFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String, PortError> {
        let state = self.state.lock().expect("fs lock poisoned");
        if state.unreadable.contains(path) {
            return Err(format!("permission denied: {}", path.display()).into());
        }
        state
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| format!("file not found: {}", path.display()).into())
    }

    fn write(&self, path: &Path, contents: &str) -> Result<(), PortError> {
        let mut state = self.state.lock().expect("fs lock poisoned");
        if state.read_only.contains(path) {
            return Err(format!("read-only file: {}", path.display()).into());
        }
        state.files.insert(path.to_path_buf(), contents.to_string());
        state.writes += 1;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let state = self.state.lock().expect("fs lock poisoned");
        state.files.contains_key(path) || state.files.keys().any(|k| k.starts_with(path))
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>, PortError> {
        let state = self.state.lock().expect("fs lock poisoned");
        let files: Vec<PathBuf> =
            state.files.keys().filter(|k| k.starts_with(root) && *k != root).cloned().collect();
        if files.is_empty() {
            return Err(format!("directory not found: {}", root.display()).into());
        }
        Ok(files)
    }
}
