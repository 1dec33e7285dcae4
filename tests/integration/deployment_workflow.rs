//! Deployment listing: project resolution order and what gets persisted.

use pagesctl::api::mock::ScriptedFetcher;
use pagesctl::api::Method;
use pagesctl::cache::{ContextRecord, PAGES_CACHE_NAME};
use pagesctl::error::{AuthError, PagesError};
use pagesctl::pages::DeploymentCommandService;
use pagesctl::selector::{PromptRecord, ScriptedSelector};
use pagesctl::vcs::FixedBranch;
use serde_json::{json, Value};

use super::test_utils::Harness;

fn project(name: &str) -> Value {
    json!({
        "name": name,
        "domains": [],
        "source": null,
        "latest_deployment": null,
        "created_on": "2024-01-01T00:00:00Z"
    })
}

fn deployment(id: &str, project: &str) -> Value {
    json!({
        "id": id,
        "url": format!("https://{}.{}.pages.dev", id, project),
        "environment": "preview",
        "project_name": project,
        "deployment_trigger": {
            "type": "github:push",
            "metadata": { "branch": "feature/login", "commit_hash": "deadbeefcafef00d" }
        },
        "latest_stage": { "name": "deploy", "status": "success", "ended_on": "2024-06-01T11:00:00Z" }
    })
}

#[tokio::test]
async fn test_non_interactive_without_project_exits_one_with_zero_requests() {
    let harness = Harness::new(ScriptedFetcher::new(), Box::new(FixedBranch::none()));

    let err = DeploymentCommandService::list(&harness.deps(), &harness.invocation(false, None), None)
        .await
        .unwrap_err();

    assert!(matches!(err, PagesError::MissingArgument(_)));
    assert_eq!(err.to_string(), "Must specify a project name.");
    assert_eq!(err.exit_code(), 1);
    assert_eq!(harness.fetcher.request_count(), 0);
}

#[tokio::test]
async fn test_cached_project_is_the_default() {
    let fetcher = ScriptedFetcher::new().on(
        Method::Get,
        "/accounts/acc/pages/projects/site/deployments",
        json!([deployment("abc123", "site")]),
    );
    let harness = Harness::new(fetcher, Box::new(FixedBranch::none()));
    harness
        .cache
        .write(
            PAGES_CACHE_NAME,
            &ContextRecord::new()
                .with_account_id("acc")
                .with_project_name("site"),
        )
        .unwrap();

    let result = DeploymentCommandService::list(&harness.deps(), &harness.invocation(false, None), None)
        .await
        .unwrap();

    assert_eq!(result.project_name, "site");
    let row = &result.rows[0];
    assert_eq!(row.environment, "Preview");
    assert_eq!(row.branch, "feature/login");
    assert_eq!(row.source, "deadbee");
    assert_eq!(row.deployment, "https://abc123.site.pages.dev");
    assert_eq!(row.status, "1 hour ago");
    assert_eq!(
        row.build,
        "https://dash.cloudflare.com/acc/pages/view/site/abc123"
    );
    assert_eq!(harness.fetcher.request_count(), 1);
}

#[tokio::test]
async fn test_interactive_selection_lists_all_projects_and_persists_only_account() {
    let projects: Vec<Value> = (0..12).map(|i| project(&format!("p{}", i))).collect();
    let fetcher = ScriptedFetcher::new()
        .paged("/accounts/acc/pages/projects", projects)
        .on(
            Method::Get,
            "/accounts/acc/pages/projects/p11/deployments",
            json!([deployment("d1", "p11")]),
        );
    let harness = Harness::new(fetcher, Box::new(FixedBranch::none()))
        .with_selector(ScriptedSelector::new().with_selection(Some(11)));

    let result =
        DeploymentCommandService::list(&harness.deps(), &harness.invocation(true, Some("acc")), None)
            .await
            .unwrap();

    assert_eq!(result.project_name, "p11");
    match &harness.selector.prompts()[0] {
        PromptRecord::Select { prompt, items } => {
            assert_eq!(prompt, "Select a project:");
            assert_eq!(items.len(), 12);
        }
        other => panic!("unexpected prompt: {:?}", other),
    }
    assert_eq!(
        harness
            .fetcher
            .requests_to(Method::Get, "/accounts/acc/pages/projects")
            .len(),
        2
    );
    assert_eq!(
        harness.cache.read(PAGES_CACHE_NAME),
        ContextRecord::new().with_account_id("acc")
    );
}

#[tokio::test]
async fn test_flag_beats_cached_project() {
    let fetcher = ScriptedFetcher::new().on(
        Method::Get,
        "/accounts/acc/pages/projects/flagged/deployments",
        json!([]),
    );
    let harness = Harness::new(fetcher, Box::new(FixedBranch::none()));
    harness
        .cache
        .write(
            PAGES_CACHE_NAME,
            &ContextRecord::new()
                .with_account_id("acc")
                .with_project_name("cached"),
        )
        .unwrap();

    let result = DeploymentCommandService::list(
        &harness.deps(),
        &harness.invocation(false, None),
        Some("flagged".to_string()),
    )
    .await
    .unwrap();

    assert_eq!(result.project_name, "flagged");
    assert_eq!(
        harness.cache.read(PAGES_CACHE_NAME).project_name.as_deref(),
        Some("cached")
    );
}

#[tokio::test]
async fn test_ambiguous_account_in_non_interactive_session() {
    let fetcher = ScriptedFetcher::new().on(
        Method::Get,
        "/memberships",
        json!([
            { "id": "m1", "account": { "id": "a1", "name": "One" } },
            { "id": "m2", "account": { "id": "a2", "name": "Two" } }
        ]),
    );
    let harness = Harness::new(fetcher, Box::new(FixedBranch::none()));

    let err = DeploymentCommandService::list(
        &harness.deps(),
        &harness.invocation(false, None),
        Some("site".to_string()),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PagesError::Auth(AuthError::AmbiguousAccount(_))));
    assert_eq!(harness.fetcher.request_count(), 1);
}

#[tokio::test]
async fn test_unknown_project_surfaces_remote_error() {
    let harness = Harness::new(ScriptedFetcher::new(), Box::new(FixedBranch::none()));

    let err = DeploymentCommandService::list(
        &harness.deps(),
        &harness.invocation(false, Some("acc")),
        Some("gone".to_string()),
    )
    .await
    .unwrap_err();

    assert!(matches!(err, PagesError::Remote(_)));
    assert!(!err.is_validation());
    assert!(harness.cache.read(PAGES_CACHE_NAME).is_empty());
}
