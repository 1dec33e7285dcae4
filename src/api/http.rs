//! reqwest-backed `Fetcher` for the remote API.
//!
//! Every response is an envelope `{ success, errors, messages, result }`; this client returns
//! `result` for successful responses and turns everything else into a `RemoteError`.

use super::{ApiRequest, Fetcher, Method};
use crate::error::{ApiMessage, RemoteError};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    errors: Vec<ApiMessage>,
    #[serde(default)]
    result: Value,
}

/// Map transport-level reqwest errors to `RemoteError`.
fn map_http_error(path: &str, error: reqwest::Error) -> RemoteError {
    if error.is_timeout() {
        RemoteError::Timeout {
            path: path.to_string(),
        }
    } else if error.is_connect() {
        RemoteError::RequestFailed {
            path: path.to_string(),
            message: format!("Connection error: {}", error),
        }
    } else {
        RemoteError::RequestFailed {
            path: path.to_string(),
            message: error.to_string(),
        }
    }
}

/// Authenticated HTTP client for the remote API
pub struct HttpFetcher {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpFetcher {
    pub fn new(
        base_url: impl Into<String>,
        token: Option<String>,
        timeout: Duration,
    ) -> Result<Self, RemoteError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .timeout(timeout)
            .user_agent(concat!("pagesctl/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RemoteError::RequestFailed {
                path: base_url.clone(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: ApiRequest) -> Result<Value, RemoteError> {
        let url = format!("{}{}", self.base_url, request.path);
        debug!(method = %request.method, path = %request.path, query = ?request.query, "API request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| map_http_error(&request.path, e))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| map_http_error(&request.path, e))?;
        debug!(path = %request.path, status = status.as_u16(), "API response");

        let envelope = serde_json::from_str::<Envelope>(&text);

        if !status.is_success() {
            let errors = match envelope {
                Ok(envelope) => envelope.errors,
                Err(_) => Vec::new(),
            };
            return Err(RemoteError::Status {
                path: request.path,
                status: status.as_u16(),
                errors,
            });
        }

        let envelope = envelope.map_err(|e| RemoteError::Decode {
            path: request.path.clone(),
            message: e.to_string(),
        })?;

        if !envelope.success {
            return Err(RemoteError::Unsuccessful {
                path: request.path,
                errors: envelope.errors,
            });
        }

        Ok(envelope.result)
    }

    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}
