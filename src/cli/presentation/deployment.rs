use super::shared::{render_json, render_table};
use crate::error::PagesError;
use crate::pages::{DeploymentListResult, DeploymentRow};

pub fn format_deployment_list_result(
    result: &DeploymentListResult,
    format: &str,
) -> Result<String, PagesError> {
    if format == "json" {
        return render_json(&result.rows);
    }
    if result.rows.is_empty() {
        return Ok(format!(
            "No deployments found for project '{}'.",
            result.project_name
        ));
    }
    Ok(render_table(
        DeploymentRow::HEADERS,
        result.rows.iter().map(DeploymentRow::cells).collect(),
    ))
}
