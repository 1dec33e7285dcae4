//! api::mock
//!
//! Scripted `Fetcher` for deterministic testing.
//!
//! Responses are registered per method and path. Fixed routes replay their responses in order
//! and keep repeating the last one; paged routes slice a fixed item list according to the
//! `page`/`per_page` query of each request. Every request is recorded for later assertions.
//!
//! # Example
//!
//! ```
//! use pagesctl::api::mock::ScriptedFetcher;
//! use pagesctl::api::{ApiRequest, Fetcher, Method};
//! use serde_json::json;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let fetcher = ScriptedFetcher::new().on(Method::Get, "/memberships", json!([]));
//! let result = fetcher.fetch(ApiRequest::get("/memberships")).await.unwrap();
//! assert_eq!(result, json!([]));
//! assert_eq!(fetcher.request_count(), 1);
//! # });
//! ```

use super::{ApiRequest, Fetcher, Method};
use crate::error::{ApiMessage, RemoteError};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
enum Route {
    Fixed {
        method: Method,
        path: String,
        responses: VecDeque<Result<Value, RemoteError>>,
    },
    Paged {
        path: String,
        items: Vec<Value>,
    },
}

#[derive(Debug)]
struct Inner {
    routes: Vec<Route>,
    requests: Vec<ApiRequest>,
    authenticated: bool,
}

/// Scripted fetcher. Clones share state.
#[derive(Debug, Clone)]
pub struct ScriptedFetcher {
    inner: Arc<Mutex<Inner>>,
}

impl Default for ScriptedFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                routes: Vec::new(),
                requests: Vec::new(),
                authenticated: true,
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn push_fixed(&self, method: Method, path: &str, response: Result<Value, RemoteError>) {
        let mut inner = self.lock();
        for route in inner.routes.iter_mut() {
            if let Route::Fixed {
                method: m,
                path: p,
                responses,
            } = route
            {
                if *m == method && p.as_str() == path {
                    responses.push_back(response);
                    return;
                }
            }
        }
        inner.routes.push(Route::Fixed {
            method,
            path: path.to_string(),
            responses: VecDeque::from([response]),
        });
    }

    /// Respond to `method path` with `result`. Repeated calls queue further responses.
    pub fn on(self, method: Method, path: &str, result: Value) -> Self {
        self.push_fixed(method, path, Ok(result));
        self
    }

    /// Fail `method path` with `error`.
    pub fn on_error(self, method: Method, path: &str, error: RemoteError) -> Self {
        self.push_fixed(method, path, Err(error));
        self
    }

    /// Serve `items` from a page-based listing at `path`.
    pub fn paged(self, path: &str, items: Vec<Value>) -> Self {
        self.lock().routes.push(Route::Paged {
            path: path.to_string(),
            items,
        });
        self
    }

    /// Report that no credentials are available.
    pub fn unauthenticated(self) -> Self {
        self.lock().authenticated = false;
        self
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.lock().requests.clone()
    }

    pub fn request_count(&self) -> usize {
        self.lock().requests.len()
    }

    /// Requests received for `method path`.
    pub fn requests_to(&self, method: Method, path: &str) -> Vec<ApiRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .cloned()
            .collect()
    }
}

fn no_route(request: &ApiRequest) -> RemoteError {
    RemoteError::Status {
        path: request.path.clone(),
        status: 404,
        errors: vec![ApiMessage {
            code: 7003,
            message: format!("No route for {} {}", request.method, request.path),
        }],
    }
}

fn serve_page(request: &ApiRequest, items: &[Value]) -> Value {
    let page: usize = request
        .query_param("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1)
        .max(1);
    let per_page: usize = request
        .query_param("per_page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(items.len().max(1));
    let start = (page - 1).saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    Value::Array(items[start..end].to_vec())
}

#[async_trait]
impl Fetcher for ScriptedFetcher {
    async fn fetch(&self, request: ApiRequest) -> Result<Value, RemoteError> {
        let mut inner = self.lock();
        inner.requests.push(request.clone());

        for route in inner.routes.iter_mut() {
            match route {
                Route::Fixed {
                    method,
                    path,
                    responses,
                } if *method == request.method && *path == request.path => {
                    return if responses.len() > 1 {
                        responses.pop_front().unwrap_or_else(|| Err(no_route(&request)))
                    } else {
                        responses
                            .front()
                            .cloned()
                            .unwrap_or_else(|| Err(no_route(&request)))
                    };
                }
                Route::Paged { path, items }
                    if request.method == Method::Get && *path == request.path =>
                {
                    return Ok(serve_page(&request, items));
                }
                _ => {}
            }
        }

        Err(no_route(&request))
    }

    fn is_authenticated(&self) -> bool {
        self.lock().authenticated
    }
}
