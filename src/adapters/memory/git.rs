//! Canned git status.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::ports::git::GitRepo;
use crate::ports::PortError;

/// Git adapter that returns a preset status result.
#[derive(Clone)]
pub struct StubGitRepo {
    status: Arc<Mutex<Result<String, String>>>,
}

impl StubGitRepo {
    /// Working tree with no changes.
    #[must_use]
    pub fn clean() -> Self {
        Self::dirty("")
    }

    /// Working tree whose porcelain status is `output`.
    #[must_use]
    pub fn dirty(output: &str) -> Self {
        Self { status: Arc::new(Mutex::new(Ok(output.to_string()))) }
    }

    /// Status queries fail with `message`.
    #[must_use]
    pub fn failing(message: &str) -> Self {
        Self { status: Arc::new(Mutex::new(Err(message.to_string()))) }
    }

    /// Replaces the porcelain output returned from now on.
    pub fn set_status(&self, output: &str) {
        *self.status.lock().expect("git lock poisoned") = Ok(output.to_string());
    }

    /// Makes status queries fail with `message` from now on.
    pub fn fail(&self, message: &str) {
        *self.status.lock().expect("git lock poisoned") = Err(message.to_string());
    }
}

impl GitRepo for StubGitRepo {
    fn status_porcelain(&self, _path: &Path) -> Result<String, PortError> {
        self.status.lock().expect("git lock poisoned").clone().map_err(Into::into)
    }
}
