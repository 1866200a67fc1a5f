use chrono::NaiveDate;
use clap::{Args, Subcommand};

/// Project commands.
#[derive(Clone, Debug, Subcommand)]
pub enum ProjectCommands {
    /// Register a project.
    Add(ProjectAddArgs),
    /// List projects.
    List,
}

#[derive(Clone, Debug, Args)]
pub struct ProjectAddArgs {
    /// Project (work order) code.
    #[arg(long)]
    pub code: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub status: Option<String>,
    /// Start date, YYYY-MM-DD.
    #[arg(long)]
    pub start: Option<NaiveDate>,
    /// Finish date, YYYY-MM-DD.
    #[arg(long)]
    pub finish: Option<NaiveDate>,
}
