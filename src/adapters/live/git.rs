//! Live git adapter using the `git` CLI.

use std::path::Path;
use std::process::Command;

use crate::ports::git::GitRepo;
use crate::ports::PortError;

/// Live git adapter that shells out to `git`.
pub struct LiveGitRepo;

impl GitRepo for LiveGitRepo {
    fn status_porcelain(&self, path: &Path) -> Result<String, PortError> {
        let output = Command::new("git")
            .arg("-C")
            .arg(path)
            .args(["status", "--porcelain", "--", "."])
            .output()?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("git status --porcelain failed: {}", stderr.trim()).into());
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
