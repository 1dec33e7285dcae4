//! Per-invocation process facts, captured once and passed explicitly to every command.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

/// Facts about the current invocation that would otherwise be read from ambient process state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationContext {
    /// Whether prompts may be shown (stdin is an attached terminal).
    pub is_interactive: bool,
    /// Account explicitly requested via flag, config, or environment.
    pub account_id: Option<String>,
    /// Working directory the command runs in.
    pub cwd: PathBuf,
}

impl InvocationContext {
    pub fn new(is_interactive: bool, account_id: Option<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            is_interactive,
            account_id,
            cwd: cwd.into(),
        }
    }

    /// Capture the invocation from the running process.
    pub fn detect(account_id: Option<String>) -> std::io::Result<Self> {
        Ok(Self {
            is_interactive: std::io::stdin().is_terminal(),
            account_id,
            cwd: std::env::current_dir()?,
        })
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }
}
