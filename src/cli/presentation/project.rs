//! Project presentation: list table/json and the create confirmation.

use super::shared::{render_json, render_table};
use crate::error::PagesError;
use crate::pages::{ProjectCreateResult, ProjectListResult, ProjectRow};
use owo_colors::OwoColorize;

pub fn format_project_list_result(
    result: &ProjectListResult,
    format: &str,
) -> Result<String, PagesError> {
    if format == "json" {
        return render_json(&result.rows);
    }
    if result.rows.is_empty() {
        return Ok("No projects found.".to_string());
    }
    Ok(render_table(
        ProjectRow::HEADERS,
        result.rows.iter().map(ProjectRow::cells).collect(),
    ))
}

/// Success message for a created project. The follow-up hint is dimmed when `color` is set.
pub fn format_project_create_result(result: &ProjectCreateResult, color: bool) -> String {
    let created = format!(
        "✨ Successfully created the '{}' project. It will be available at https://{}/ once you create your first deployment.",
        result.project_name, result.subdomain
    );
    let hint = "To deploy a folder of assets, run 'pagesctl deploy [directory]'.";
    if color {
        format!("{}\n{}", created, hint.dimmed())
    } else {
        format!("{}\n{}", created, hint)
    }
}
