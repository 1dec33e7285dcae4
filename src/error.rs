//! Error types for the pagesctl resource-resolution layer.

use thiserror::Error;

/// A single error entry reported by the remote API envelope.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl std::fmt::Display for ApiMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [code: {}]", self.message, self.code)
    }
}

fn join_messages(errors: &[ApiMessage]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn join_ids(ids: &[String]) -> String {
    ids.join(", ")
}

/// Failures of the remote API call itself.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    #[error("Request to {path} failed: {message}")]
    RequestFailed { path: String, message: String },

    #[error("Request to {path} timed out")]
    Timeout { path: String },

    #[error("Request to {path} failed with status {status}: {}", join_messages(.errors))]
    Status {
        path: String,
        status: u16,
        errors: Vec<ApiMessage>,
    },

    #[error("Request to {path} was not successful: {}", join_messages(.errors))]
    Unsuccessful { path: String, errors: Vec<ApiMessage> },

    #[error("Failed to decode response from {path}: {message}")]
    Decode { path: String, message: String },
}

/// Failures resolving the account a command runs against.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("No API token configured. Set PAGESCTL_API__TOKEN or `api.token` in the config file.")]
    MissingToken,

    #[error("No accounts are available for this API token.")]
    NoMemberships,

    #[error(
        "More than one account is available but the session is not interactive. \
         Pass --account-id or set PAGESCTL_ACCOUNT_ID to one of: {}",
        join_ids(.0)
    )]
    AmbiguousAccount(Vec<String>),

    #[error("No account was selected.")]
    NoSelection,

    #[error("Account selection failed: {0}")]
    Prompt(String),

    #[error("Failed to look up account memberships: {0}")]
    Lookup(#[source] RemoteError),
}

/// Top-level error for every pagesctl command.
#[derive(Debug, Error)]
pub enum PagesError {
    /// A required identifier could not be resolved from flags, cache, or prompts.
    #[error("{0}")]
    MissingArgument(String),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Remote API error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Cache error: {0}")]
    Cache(String),

    #[error("Prompt failed: {0}")]
    Prompt(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PagesError {
    /// Process exit code for this error. Every failure, validation or not, exits with 1.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// True when the command was aborted before reaching the remote API.
    pub fn is_validation(&self) -> bool {
        matches!(self, PagesError::MissingArgument(_))
    }
}

impl From<config::ConfigError> for PagesError {
    fn from(err: config::ConfigError) -> Self {
        PagesError::Config(err.to_string())
    }
}
