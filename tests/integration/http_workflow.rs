//! End-to-end command runs over HTTP against a mock API server.

use pagesctl::api::HttpFetcher;
use pagesctl::cache::{ContextCache, PAGES_CACHE_NAME};
use pagesctl::error::{AuthError, PagesError, RemoteError};
use pagesctl::invocation::InvocationContext;
use pagesctl::pages::{Collaborators, ProjectCommandService};
use pagesctl::selector::ScriptedSelector;
use pagesctl::vcs::FixedBranch;
use serde_json::{json, Value};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::test_utils::fixed_now;

fn envelope(result: Value) -> Value {
    json!({ "success": true, "errors": [], "messages": [], "result": result })
}

fn projects(range: std::ops::Range<usize>) -> Value {
    json!(range
        .map(|i| json!({
            "name": format!("site-{}", i),
            "domains": [],
            "source": null,
            "latest_deployment": null,
            "created_on": "2024-06-01T11:59:00Z"
        }))
        .collect::<Vec<_>>())
}

async fn mount_page(server: &MockServer, page: &str, result: Value) {
    Mock::given(method("GET"))
        .and(path("/accounts/acc/pages/projects"))
        .and(query_param("per_page", "10"))
        .and(query_param("page", page))
        .and(header("authorization", "Bearer token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(result)))
        .expect(1)
        .mount(server)
        .await;
}

struct Setup {
    _dir: TempDir,
    cache: ContextCache,
    fetcher: HttpFetcher,
    selector: ScriptedSelector,
    branch: FixedBranch,
    invocation: InvocationContext,
}

impl Setup {
    fn new(server: &MockServer, token: Option<&str>) -> Self {
        let dir = TempDir::new().unwrap();
        Self {
            cache: ContextCache::new(dir.path().join("cache")),
            fetcher: HttpFetcher::new(
                server.uri(),
                token.map(str::to_string),
                Duration::from_secs(5),
            )
            .unwrap(),
            selector: ScriptedSelector::new(),
            branch: FixedBranch::none(),
            invocation: InvocationContext::new(false, None, dir.path()),
            _dir: dir,
        }
    }

    fn deps(&self) -> Collaborators<'_> {
        Collaborators {
            fetcher: &self.fetcher,
            selector: &self.selector,
            branch_detector: &self.branch,
            cache: &self.cache,
            dashboard_url: "https://dash.cloudflare.com",
            now: fixed_now(),
        }
    }
}

#[tokio::test]
async fn test_project_list_over_http_pages_ten_ten_three() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/memberships"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "id": "m1", "account": { "id": "acc", "name": "Team" } }
        ]))))
        .expect(1)
        .mount(&server)
        .await;
    mount_page(&server, "1", projects(0..10)).await;
    mount_page(&server, "2", projects(10..20)).await;
    mount_page(&server, "3", projects(20..23)).await;

    let setup = Setup::new(&server, Some("token"));
    let result = ProjectCommandService::list(&setup.deps(), &setup.invocation)
        .await
        .unwrap();

    assert_eq!(result.rows.len(), 23);
    assert_eq!(result.rows[22].project_name, "site-22");
    assert_eq!(result.rows[0].last_modified, "1 minute ago");
    assert_eq!(
        setup.cache.read(PAGES_CACHE_NAME).account_id.as_deref(),
        Some("acc")
    );
}

#[tokio::test]
async fn test_project_create_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/acc/pages/projects"))
        .and(body_json(json!({ "name": "demo", "production_branch": "main" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "name": "demo",
            "subdomain": "demo.pages.dev"
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let mut setup = Setup::new(&server, Some("token"));
    setup.invocation.account_id = Some("acc".to_string());

    let result = ProjectCommandService::create(
        &setup.deps(),
        &setup.invocation,
        Some("demo".to_string()),
        Some("main".to_string()),
    )
    .await
    .unwrap();

    assert_eq!(result.subdomain, "demo.pages.dev");
    let cached = setup.cache.read(PAGES_CACHE_NAME);
    assert_eq!(cached.account_id.as_deref(), Some("acc"));
    assert_eq!(cached.project_name.as_deref(), Some("demo"));
}

#[tokio::test]
async fn test_conflicting_create_reports_api_errors() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/accounts/acc/pages/projects"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "success": false,
            "errors": [{ "code": 8000002, "message": "A project with this name already exists." }],
            "result": null
        })))
        .mount(&server)
        .await;

    let mut setup = Setup::new(&server, Some("token"));
    setup.invocation.account_id = Some("acc".to_string());

    let err = ProjectCommandService::create(
        &setup.deps(),
        &setup.invocation,
        Some("demo".to_string()),
        Some("main".to_string()),
    )
    .await
    .unwrap_err();

    match err {
        PagesError::Remote(RemoteError::Status { status, errors, .. }) => {
            assert_eq!(status, 409);
            assert_eq!(errors[0].code, 8000002);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(setup.cache.read(PAGES_CACHE_NAME).is_empty());
}

#[tokio::test]
async fn test_missing_token_never_reaches_the_server() {
    let server = MockServer::start().await;
    let setup = Setup::new(&server, None);

    let err = ProjectCommandService::list(&setup.deps(), &setup.invocation)
        .await
        .unwrap_err();

    assert!(matches!(err, PagesError::Auth(AuthError::MissingToken)));
    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}
