//! Version-control branch detection
//!
//! Used only to offer a default production branch when creating a project. Detection never
//! fails: anything that goes wrong reads as "no branch".

use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::debug;

/// Detects the branch checked out in the working directory.
pub trait BranchDetector: Send + Sync {
    fn detect_default_branch(&self) -> Option<String>;
}

/// Runs `git` in a working directory.
#[derive(Debug, Clone)]
pub struct GitBranchDetector {
    cwd: PathBuf,
}

impl GitBranchDetector {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self { cwd: cwd.into() }
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    fn git(&self, args: &[&str]) -> Option<String> {
        let output = match Command::new("git").args(args).current_dir(&self.cwd).output() {
            Ok(output) => output,
            Err(e) => {
                debug!(?args, "git could not be run: {}", e);
                return None;
            }
        };
        if !output.status.success() {
            debug!(?args, status = ?output.status.code(), "git exited unsuccessfully");
            return None;
        }
        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            None
        } else {
            Some(stdout)
        }
    }
}

impl BranchDetector for GitBranchDetector {
    fn detect_default_branch(&self) -> Option<String> {
        if self.git(&["rev-parse", "--is-inside-work-tree"]).as_deref() != Some("true") {
            debug!(cwd = %self.cwd.display(), "Not inside a git work tree");
            return None;
        }
        // Detached checkouts report the literal "HEAD".
        self.git(&["rev-parse", "--abbrev-ref", "HEAD"])
            .filter(|branch| branch != "HEAD")
    }
}

/// Detector with a fixed answer.
#[derive(Debug, Clone, Default)]
pub struct FixedBranch(pub Option<String>);

impl FixedBranch {
    pub fn none() -> Self {
        Self(None)
    }

    pub fn named(branch: impl Into<String>) -> Self {
        Self(Some(branch.into()))
    }
}

impl BranchDetector for FixedBranch {
    fn detect_default_branch(&self) -> Option<String> {
        self.0.clone()
    }
}
