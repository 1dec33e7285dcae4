//! Shared test utilities for integration tests
//!
//! Environment isolation for tests that read configuration from the process environment, and
//! a small harness bundling the scripted collaborators the command services need.

use chrono::{DateTime, TimeZone, Utc};
use pagesctl::api::mock::ScriptedFetcher;
use pagesctl::cache::ContextCache;
use pagesctl::invocation::InvocationContext;
use pagesctl::pages::Collaborators;
use pagesctl::selector::ScriptedSelector;
use pagesctl::vcs::{BranchDetector, GitBranchDetector};
use std::sync::Mutex;
use tempfile::TempDir;

/// Global mutex to serialize environment variable access across all tests
static ENV_MUTEX: Mutex<()> = Mutex::new(());

/// Environment variable state to restore after test
struct EnvState {
    vars: Vec<(String, Option<String>)>,
}

impl EnvState {
    fn capture(names: &[&str]) -> Self {
        Self {
            vars: names
                .iter()
                .map(|name| (name.to_string(), std::env::var(name).ok()))
                .collect(),
        }
    }

    fn restore(self) {
        for (name, value) in self.vars {
            match value {
                Some(value) => std::env::set_var(&name, value),
                None => std::env::remove_var(&name),
            }
        }
    }
}

const ISOLATED_VARS: &[&str] = &[
    "HOME",
    "XDG_CONFIG_HOME",
    "PAGESCTL_ACCOUNT_ID",
    "PAGESCTL_API__TOKEN",
    "PAGESCTL_API__BASE_URL",
    "PAGESCTL_API__TIMEOUT_SECS",
];

/// Run `f` with HOME and XDG_CONFIG_HOME inside `test_dir`, the `PAGESCTL_*` variables this
/// crate reads cleared, and then `vars` applied. The original environment is restored afterwards.
pub fn with_isolated_env<F, R>(test_dir: &TempDir, vars: &[(&str, &str)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let env_state = EnvState::capture(ISOLATED_VARS);

    let test_home = test_dir.path().join("home");
    let test_config_home = test_dir.path().join("config");
    std::fs::create_dir_all(&test_home).unwrap();
    std::fs::create_dir_all(&test_config_home).unwrap();

    for name in ISOLATED_VARS {
        std::env::remove_var(name);
    }
    std::env::set_var("HOME", test_home.to_str().unwrap());
    std::env::set_var("XDG_CONFIG_HOME", test_config_home.to_str().unwrap());
    for (name, value) in vars {
        std::env::set_var(name, value);
    }

    let result = f();

    env_state.restore();

    result
}

/// Fixed reference instant used for relative times.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Scripted collaborators rooted in a temporary working directory.
pub struct Harness {
    pub dir: TempDir,
    pub cache: ContextCache,
    pub fetcher: ScriptedFetcher,
    pub selector: ScriptedSelector,
    pub branch: Box<dyn BranchDetector>,
}

impl Harness {
    pub fn new(fetcher: ScriptedFetcher, branch: Box<dyn BranchDetector>) -> Self {
        let dir = TempDir::new().unwrap();
        let cache = ContextCache::new(dir.path().join(".pagesctl").join("cache"));
        Self {
            dir,
            cache,
            fetcher,
            selector: ScriptedSelector::new(),
            branch,
        }
    }

    pub fn with_selector(mut self, selector: ScriptedSelector) -> Self {
        self.selector = selector;
        self
    }

    /// Detect branches with git in the (repository-less) working directory.
    pub fn with_git_branch_detection(mut self) -> Self {
        self.branch = Box::new(GitBranchDetector::new(self.dir.path()));
        self
    }

    pub fn deps(&self) -> Collaborators<'_> {
        Collaborators {
            fetcher: &self.fetcher,
            selector: &self.selector,
            branch_detector: self.branch.as_ref(),
            cache: &self.cache,
            dashboard_url: "https://dash.cloudflare.com",
            now: fixed_now(),
        }
    }

    pub fn invocation(&self, is_interactive: bool, account_id: Option<&str>) -> InvocationContext {
        InvocationContext::new(
            is_interactive,
            account_id.map(str::to_string),
            self.dir.path(),
        )
    }
}
