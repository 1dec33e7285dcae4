//! CLI help and command-name contract for logging and routing.

use crate::cli::parse::{Commands, DeploymentCommands, ProjectCommands};

/// Command name string for log records (e.g. "project.list", "deployment.list").
pub fn command_name(command: &Commands) -> String {
    match command {
        Commands::Project { command } => format!("project.{}", project_command_name(command)),
        Commands::Deployment { command } => {
            format!("deployment.{}", deployment_command_name(command))
        }
    }
}

pub fn project_command_name(command: &ProjectCommands) -> &'static str {
    match command {
        ProjectCommands::List { .. } => "list",
        ProjectCommands::Create { .. } => "create",
    }
}

pub fn deployment_command_name(command: &DeploymentCommands) -> &'static str {
    match command {
        DeploymentCommands::List { .. } => "list",
    }
}
