//! CLI route: single route table and run context. Dispatches to domain services and presentation.

use crate::api::HttpFetcher;
use crate::cache::ContextCache;
use crate::config::{ConfigLoader, PagesConfig};
use crate::error::PagesError;
use crate::invocation::InvocationContext;
use crate::pages::{Collaborators, DeploymentCommandService, ProjectCommandService};
use crate::selector::TerminalSelector;
use crate::vcs::GitBranchDetector;
use chrono::Utc;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::cli::command_name;
use crate::cli::parse::{Commands, DeploymentCommands, ProjectCommands};
use crate::cli::presentation::{
    format_deployment_list_result, format_project_create_result, format_project_list_result,
};

/// Runtime context for CLI execution: resolved config, invocation facts, and collaborators.
/// Built from the optional config path using ConfigLoader only.
pub struct RunContext {
    config: PagesConfig,
    invocation: InvocationContext,
    fetcher: HttpFetcher,
    selector: TerminalSelector,
    branch_detector: GitBranchDetector,
    cache: ContextCache,
    color: bool,
}

impl RunContext {
    /// Create run context from an optional config path and an explicit `--account-id`.
    /// The flag wins over the account configured in files or the environment.
    pub fn new(
        config_path: Option<PathBuf>,
        account_id: Option<String>,
    ) -> Result<Self, PagesError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        let invocation =
            InvocationContext::detect(account_id.or_else(|| config.account_id.clone()))?;

        let fetcher = HttpFetcher::new(
            config.api.base_url.clone(),
            config.api.token.clone(),
            Duration::from_secs(config.api.timeout_secs),
        )?;
        let cache = ContextCache::new(config.cache.resolve_dir(invocation.cwd()));
        let branch_detector = GitBranchDetector::new(invocation.cwd());

        Ok(Self {
            config,
            invocation,
            fetcher,
            selector: TerminalSelector::new(),
            branch_detector,
            cache,
            color: std::io::stdout().is_terminal(),
        })
    }

    pub fn config(&self) -> &PagesConfig {
        &self.config
    }

    pub fn invocation(&self) -> &InvocationContext {
        &self.invocation
    }

    /// Execute a CLI command via the single route table.
    pub fn execute(&self, command: &Commands) -> Result<String, PagesError> {
        let name = command_name(command);
        info!(command = %name, interactive = self.invocation.is_interactive, "Running command");

        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| PagesError::Config(format!("Failed to create async runtime: {}", e)))?;
        let result = runtime.block_on(self.execute_inner(command));

        info!(command = %name, ok = result.is_ok(), "Command finished");
        result
    }

    fn collaborators(&self) -> Collaborators<'_> {
        Collaborators {
            fetcher: &self.fetcher,
            selector: &self.selector,
            branch_detector: &self.branch_detector,
            cache: &self.cache,
            dashboard_url: &self.config.api.dashboard_url,
            now: Utc::now(),
        }
    }

    async fn execute_inner(&self, command: &Commands) -> Result<String, PagesError> {
        match command {
            Commands::Project { command } => self.handle_project_command(command).await,
            Commands::Deployment { command } => self.handle_deployment_command(command).await,
        }
    }

    async fn handle_project_command(&self, command: &ProjectCommands) -> Result<String, PagesError> {
        let deps = self.collaborators();
        match command {
            ProjectCommands::List { format } => {
                let result = ProjectCommandService::list(&deps, &self.invocation).await?;
                format_project_list_result(&result, format)
            }
            ProjectCommands::Create {
                project_name,
                production_branch,
            } => {
                let result = ProjectCommandService::create(
                    &deps,
                    &self.invocation,
                    project_name.clone(),
                    production_branch.clone(),
                )
                .await?;
                Ok(format_project_create_result(&result, self.color))
            }
        }
    }

    async fn handle_deployment_command(
        &self,
        command: &DeploymentCommands,
    ) -> Result<String, PagesError> {
        let deps = self.collaborators();
        match command {
            DeploymentCommands::List {
                project_name,
                format,
            } => {
                let result =
                    DeploymentCommandService::list(&deps, &self.invocation, project_name.clone())
                        .await?;
                format_deployment_list_result(&result, format)
            }
        }
    }
}
