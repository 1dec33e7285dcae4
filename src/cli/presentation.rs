//! CLI presentation: text and json formatters per command family.

mod deployment;
mod project;
mod shared;

pub use deployment::format_deployment_list_result;
pub use project::{format_project_create_result, format_project_list_result};
