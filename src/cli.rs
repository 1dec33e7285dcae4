//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to domain services.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands, DeploymentCommands, ProjectCommands};
pub use presentation::{
    format_deployment_list_result, format_project_create_result, format_project_list_result,
};
pub use route::RunContext;
