use clap::{Args, Subcommand};

use crate::cli::subcommands::ProjectCommands;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Create the store and every missing table and index.
    Provision,
    /// Load the standard master data.
    Seed(SeedArgs),
    /// Print the rows of one table.
    Read(ReadArgs),
    /// Compare the store schema with the expected one.
    Verify,
    /// Projects.
    Project {
        #[command(subcommand)]
        action: ProjectCommands,
    },
}

#[derive(Clone, Debug, Args)]
pub struct SeedArgs {
    /// Also create the standard phases under this project code.
    #[arg(long)]
    pub project: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct ReadArgs {
    /// Table name (case-insensitive).
    pub table: String,
    /// Equality filter `column=value`; repeatable, conditions are AND-ed.
    #[arg(long = "where", value_name = "COLUMN=VALUE")]
    pub conditions: Vec<String>,
    /// Max rows to return (0 for no limit).
    #[arg(short, long)]
    pub limit: Option<u32>,
}
