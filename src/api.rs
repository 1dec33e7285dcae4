//! Remote API Access
//!
//! The `Fetcher` trait is the single seam through which commands talk to the remote API: one
//! request in, the unwrapped `result` payload out. `HttpFetcher` implements it over reqwest;
//! `mock::ScriptedFetcher` replays scripted responses for tests.

use crate::error::RemoteError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub mod http;
pub mod mock;

pub use http::HttpFetcher;

/// Path of the account memberships listing.
pub const MEMBERSHIPS_PATH: &str = "/memberships";

/// Paginated listing of projects, also the target of project creation.
pub fn projects_path(account_id: &str) -> String {
    format!("/accounts/{}/pages/projects", account_id)
}

/// Unpaginated listing of a project's deployments.
pub fn deployments_path(account_id: &str, project_name: &str) -> String {
    format!(
        "/accounts/{}/pages/projects/{}/deployments",
        account_id, project_name
    )
}

/// HTTP method of an API request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
        }
    }
}

/// A request against the remote API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self {
            method: Method::Post,
            path: path.into(),
            query: Vec::new(),
            body: Some(body),
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Value of the first query parameter named `key`.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Remote API capability
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Perform a request and return the `result` payload of a successful response.
    async fn fetch(&self, request: ApiRequest) -> Result<Value, RemoteError>;

    /// Whether credentials are available for authenticated requests.
    fn is_authenticated(&self) -> bool {
        true
    }
}

/// Perform a request and decode its `result` payload.
pub async fn fetch_result<T: DeserializeOwned>(
    fetcher: &dyn Fetcher,
    request: ApiRequest,
) -> Result<T, RemoteError> {
    let path = request.path.clone();
    let value = fetcher.fetch(request).await?;
    serde_json::from_value(value).map_err(|e| RemoteError::Decode {
        path,
        message: e.to_string(),
    })
}
