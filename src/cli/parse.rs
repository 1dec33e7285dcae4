//! CLI parse: clap types for pagesctl. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

const BETA_NOTE: &str = "Note: the pages commands are in beta; their output may change.";

/// pagesctl - manage Pages projects and deployments
#[derive(Parser)]
#[command(name = "pagesctl")]
#[command(version)]
#[command(about = "Manage Pages projects and deployments from the command line")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered over the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Account to run against when none is cached
    #[arg(long, global = true)]
    pub account_id: Option<String>,

    /// Enable verbose logging to stderr (default: off)
    #[arg(long, global = true, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long, global = true)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage projects
    #[command(after_help = BETA_NOTE)]
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Inspect deployments
    #[command(after_help = BETA_NOTE)]
    Deployment {
        #[command(subcommand)]
        command: DeploymentCommands,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// List the projects of the account
    List {
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
    /// Create a new project
    Create {
        /// Name of the project (prompted for when omitted in an interactive session)
        project_name: Option<String>,
        /// Branch whose deployments go to production
        #[arg(long)]
        production_branch: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum DeploymentCommands {
    /// List the deployments of a project
    List {
        /// Project to list (defaults to the cached project, or a selection prompt)
        #[arg(long)]
        project_name: Option<String>,
        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },
}
