//! Remote resource types, decoded from the `result` payload of API responses.
//!
//! Only the fields the commands consume are modelled; everything else is ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A project as returned by the projects listing.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Project {
    pub name: String,

    #[serde(default)]
    pub subdomain: Option<String>,

    #[serde(default)]
    pub domains: Vec<String>,

    /// Linked git provider, if any.
    #[serde(default)]
    pub source: Option<Value>,

    #[serde(default)]
    pub latest_deployment: Option<DeploymentSummary>,

    pub created_on: DateTime<Utc>,

    #[serde(default)]
    pub production_branch: Option<String>,
}

impl Project {
    pub fn has_git_provider(&self) -> bool {
        self.source.is_some()
    }

    /// Latest deployment change, falling back to creation time.
    pub fn last_modified(&self) -> DateTime<Utc> {
        self.latest_deployment
            .as_ref()
            .map(|d| d.modified_on)
            .unwrap_or(self.created_on)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DeploymentSummary {
    pub modified_on: DateTime<Utc>,
}

/// A deployment of a project.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Deployment {
    pub id: String,
    pub url: String,
    pub environment: String,
    pub project_name: String,

    #[serde(default)]
    pub deployment_trigger: DeploymentTrigger,

    pub latest_stage: Stage,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DeploymentTrigger {
    #[serde(default)]
    pub metadata: TriggerMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TriggerMetadata {
    #[serde(default)]
    pub branch: Option<String>,
    #[serde(default)]
    pub commit_hash: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stage {
    pub status: String,
    #[serde(default)]
    pub ended_on: Option<DateTime<Utc>>,
}

/// Body of the create-project request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub production_branch: String,
}

/// Fields of the create-project response the command uses.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreatedProject {
    pub subdomain: String,
}
