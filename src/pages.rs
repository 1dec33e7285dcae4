//! Pages projects and deployments
//!
//! Remote resource types, list-row formatting, and the command services behind
//! `project list`, `project create`, and `deployment list`.

pub mod commands;
pub mod format;
pub mod types;

pub use commands::{
    Collaborators, DeploymentCommandService, DeploymentListResult, DeploymentRow,
    ProjectCommandService, ProjectCreateResult, ProjectListResult, ProjectRow,
};
pub use types::{Deployment, Project};
