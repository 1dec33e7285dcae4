//! Project and deployment command services.
//!
//! Each command reads the cached context, resolves the account, fills in missing identifiers
//! from prompts when the invocation is interactive, talks to the remote API, and writes back
//! the context it resolved. Required identifiers that cannot be resolved in a non-interactive
//! invocation abort the command before any remote call is made.

use crate::api::{deployments_path, fetch_result, projects_path, ApiRequest, Fetcher};
use crate::auth::AuthResolver;
use crate::cache::{ContextCache, ContextRecord, PAGES_CACHE_NAME};
use crate::error::{PagesError, RemoteError};
use crate::invocation::InvocationContext;
use crate::pages::format::{short_sha, time_ago, title_case};
use crate::pages::types::{CreateProjectRequest, CreatedProject, Deployment, Project};
use crate::pagination::{fetch_all, PROJECTS_PAGE_SIZE};
use crate::selector::{prompt_text, select_one, Selector};
use crate::vcs::BranchDetector;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

pub const PROJECT_NAME_PROMPT: &str = "Enter the name of your new project:";
pub const PRODUCTION_BRANCH_PROMPT: &str = "Enter the production branch name:";
pub const SELECT_PROJECT_PROMPT: &str = "Select a project:";
pub const MISSING_PROJECT_NAME: &str = "Must specify a project name.";
pub const MISSING_PRODUCTION_BRANCH: &str = "Must specify a production branch.";

/// Branch offered when none can be detected.
pub const FALLBACK_PRODUCTION_BRANCH: &str = "production";

/// Everything a command talks to besides its arguments.
pub struct Collaborators<'a> {
    pub fetcher: &'a dyn Fetcher,
    pub selector: &'a dyn Selector,
    pub branch_detector: &'a dyn BranchDetector,
    pub cache: &'a ContextCache,
    /// Base of the per-deployment dashboard link.
    pub dashboard_url: &'a str,
    /// Reference instant for relative times.
    pub now: DateTime<Utc>,
}

impl Collaborators<'_> {
    async fn resolve_account(
        &self,
        cached: &ContextRecord,
        invocation: &InvocationContext,
    ) -> Result<String, PagesError> {
        Ok(AuthResolver::new(self.fetcher, self.selector)
            .resolve(cached, invocation)
            .await?)
    }

    async fn list_projects(&self, account_id: &str) -> Result<Vec<Project>, PagesError> {
        Ok(fetch_all(self.fetcher, &projects_path(account_id), PROJECTS_PAGE_SIZE).await?)
    }
}

/// One row of the project listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRow {
    pub project_name: String,
    pub project_domains: String,
    pub git_provider: String,
    pub last_modified: String,
}

impl ProjectRow {
    pub const HEADERS: [&'static str; 4] =
        ["Project Name", "Project Domains", "Git Provider", "Last Modified"];

    pub fn from_project(project: &Project, now: DateTime<Utc>) -> Self {
        Self {
            project_name: project.name.clone(),
            project_domains: project.domains.join(", "),
            git_provider: if project.has_git_provider() { "Yes" } else { "No" }.to_string(),
            last_modified: time_ago(project.last_modified(), now),
        }
    }

    pub fn cells(&self) -> [&str; 4] {
        [
            self.project_name.as_str(),
            self.project_domains.as_str(),
            self.git_provider.as_str(),
            self.last_modified.as_str(),
        ]
    }
}

/// One row of the deployment listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentRow {
    pub environment: String,
    pub branch: String,
    pub source: String,
    pub deployment: String,
    pub status: String,
    pub build: String,
}

impl DeploymentRow {
    pub const HEADERS: [&'static str; 6] =
        ["Environment", "Branch", "Source", "Deployment", "Status", "Build"];

    pub fn from_deployment(
        deployment: &Deployment,
        account_id: &str,
        dashboard_url: &str,
        now: DateTime<Utc>,
    ) -> Self {
        let metadata = &deployment.deployment_trigger.metadata;
        let stage = &deployment.latest_stage;
        let status = match (stage.status.as_str(), stage.ended_on) {
            ("success", Some(ended_on)) => time_ago(ended_on, now),
            (status, _) => title_case(status),
        };

        Self {
            environment: title_case(&deployment.environment),
            branch: metadata.branch.clone().unwrap_or_default(),
            source: metadata
                .commit_hash
                .as_deref()
                .map(short_sha)
                .unwrap_or_default(),
            deployment: deployment.url.clone(),
            status,
            build: format!(
                "{}/{}/pages/view/{}/{}",
                dashboard_url.trim_end_matches('/'),
                account_id,
                deployment.project_name,
                deployment.id
            ),
        }
    }

    pub fn cells(&self) -> [&str; 6] {
        [
            self.environment.as_str(),
            self.branch.as_str(),
            self.source.as_str(),
            self.deployment.as_str(),
            self.status.as_str(),
            self.build.as_str(),
        ]
    }
}

/// Result of project list command.
#[derive(Debug, Clone)]
pub struct ProjectListResult {
    pub account_id: String,
    pub rows: Vec<ProjectRow>,
}

/// Result of project create command.
#[derive(Debug, Clone)]
pub struct ProjectCreateResult {
    pub account_id: String,
    pub project_name: String,
    pub production_branch: String,
    pub subdomain: String,
}

/// Result of deployment list command.
#[derive(Debug, Clone)]
pub struct DeploymentListResult {
    pub account_id: String,
    pub project_name: String,
    pub rows: Vec<DeploymentRow>,
}

pub struct ProjectCommandService;

impl ProjectCommandService {
    /// List every project of the account. Persists the resolved account.
    pub async fn list(
        deps: &Collaborators<'_>,
        invocation: &InvocationContext,
    ) -> Result<ProjectListResult, PagesError> {
        let cached = deps.cache.read(PAGES_CACHE_NAME);
        let account_id = deps.resolve_account(&cached, invocation).await?;

        let projects = deps.list_projects(&account_id).await?;
        info!(account_id = %account_id, count = projects.len(), "Listed projects");
        let rows = projects
            .iter()
            .map(|p| ProjectRow::from_project(p, deps.now))
            .collect();

        deps.cache.write(
            PAGES_CACHE_NAME,
            &ContextRecord::new().with_account_id(account_id.clone()),
        )?;

        Ok(ProjectListResult { account_id, rows })
    }

    /// Create a project, prompting for the name and production branch when they are not given.
    /// Persists the account and the new project name.
    pub async fn create(
        deps: &Collaborators<'_>,
        invocation: &InvocationContext,
        project_name: Option<String>,
        production_branch: Option<String>,
    ) -> Result<ProjectCreateResult, PagesError> {
        let project_name = project_name.filter(|n| !n.trim().is_empty());
        let production_branch = production_branch.filter(|b| !b.trim().is_empty());

        if !invocation.is_interactive {
            if project_name.is_none() {
                return Err(PagesError::MissingArgument(MISSING_PROJECT_NAME.to_string()));
            }
            if production_branch.is_none() {
                return Err(PagesError::MissingArgument(
                    MISSING_PRODUCTION_BRANCH.to_string(),
                ));
            }
        }

        let cached = deps.cache.read(PAGES_CACHE_NAME);
        let account_id = deps.resolve_account(&cached, invocation).await?;

        let project_name = match project_name {
            Some(name) => name,
            None => prompt_text(deps.selector, PROJECT_NAME_PROMPT, None)?.ok_or_else(|| {
                PagesError::MissingArgument(MISSING_PROJECT_NAME.to_string())
            })?,
        };

        let production_branch = match production_branch {
            Some(branch) => branch,
            None => {
                let offered = deps
                    .branch_detector
                    .detect_default_branch()
                    .unwrap_or_else(|| FALLBACK_PRODUCTION_BRANCH.to_string());
                prompt_text(deps.selector, PRODUCTION_BRANCH_PROMPT, Some(offered.as_str()))?
                    .ok_or_else(|| {
                        PagesError::MissingArgument(MISSING_PRODUCTION_BRANCH.to_string())
                    })?
            }
        };

        let path = projects_path(&account_id);
        let body = serde_json::to_value(CreateProjectRequest {
            name: project_name.clone(),
            production_branch: production_branch.clone(),
        })
        .map_err(|e| RemoteError::RequestFailed {
            path: path.clone(),
            message: format!("Failed to encode request body: {}", e),
        })?;
        let created: CreatedProject =
            fetch_result(deps.fetcher, ApiRequest::post(path, body)).await?;
        info!(
            account_id = %account_id,
            project_name = %project_name,
            subdomain = %created.subdomain,
            "Created project"
        );

        deps.cache.write(
            PAGES_CACHE_NAME,
            &ContextRecord::new()
                .with_account_id(account_id.clone())
                .with_project_name(project_name.clone()),
        )?;

        Ok(ProjectCreateResult {
            account_id,
            project_name,
            production_branch,
            subdomain: created.subdomain,
        })
    }
}

pub struct DeploymentCommandService;

impl DeploymentCommandService {
    /// List the deployments of a project.
    ///
    /// The project comes from the argument, then the cached context, then an interactive
    /// selection over the account's projects. Only the account is persisted.
    pub async fn list(
        deps: &Collaborators<'_>,
        invocation: &InvocationContext,
        project_name: Option<String>,
    ) -> Result<DeploymentListResult, PagesError> {
        let cached = deps.cache.read(PAGES_CACHE_NAME);
        let project_name = project_name
            .filter(|n| !n.trim().is_empty())
            .or_else(|| cached.project_name.clone().filter(|n| !n.trim().is_empty()));

        if project_name.is_none() && !invocation.is_interactive {
            return Err(PagesError::MissingArgument(MISSING_PROJECT_NAME.to_string()));
        }

        let account_id = deps.resolve_account(&cached, invocation).await?;

        let project_name = match project_name {
            Some(name) => name,
            None => {
                let projects = deps.list_projects(&account_id).await?;
                select_one(
                    deps.selector,
                    SELECT_PROJECT_PROMPT,
                    &projects,
                    |p| p.name.clone(),
                    invocation.is_interactive,
                )?
                .map(|p| p.name.clone())
                .ok_or_else(|| PagesError::MissingArgument(MISSING_PROJECT_NAME.to_string()))?
            }
        };

        let deployments: Vec<Deployment> = fetch_result(
            deps.fetcher,
            ApiRequest::get(deployments_path(&account_id, &project_name)),
        )
        .await?;
        info!(
            account_id = %account_id,
            project_name = %project_name,
            count = deployments.len(),
            "Listed deployments"
        );
        let rows = deployments
            .iter()
            .map(|d| DeploymentRow::from_deployment(d, &account_id, deps.dashboard_url, deps.now))
            .collect();

        deps.cache.write(
            PAGES_CACHE_NAME,
            &ContextRecord::new().with_account_id(account_id.clone()),
        )?;

        Ok(DeploymentListResult {
            account_id,
            project_name,
            rows,
        })
    }
}
