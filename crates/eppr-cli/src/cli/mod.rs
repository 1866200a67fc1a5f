use clap::Parser;

pub mod global;
pub mod root_commands;
pub mod subcommands;

pub use global::{GlobalFlags, OutputFormat};
pub use root_commands::Commands;

/// Top-level CLI parser for the `eppr` binary.
#[derive(Debug, Parser)]
#[command(
    name = "eppr",
    version,
    about = "EPPR - engineering progress and performance store"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format: json, table, raw
    #[arg(short, long, global = true, default_value = "table")]
    pub format: OutputFormat,

    /// Store file (overrides database.path from config)
    #[arg(long, global = true)]
    pub db: Option<String>,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Extract ergonomic global flags struct for command handlers.
    #[must_use]
    pub fn global_flags(&self) -> GlobalFlags {
        GlobalFlags {
            format: self.format,
            db: self.db.clone(),
            quiet: self.quiet,
            verbose: self.verbose,
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};
    use pretty_assertions::assert_eq;

    use super::subcommands::ProjectCommands;
    use super::{Cli, Commands, GlobalFlags, OutputFormat};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_before_subcommand() {
        let cli = Cli::try_parse_from(["eppr", "--format", "json", "--verbose", "verify"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Verify));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from(["eppr", "provision", "--format", "raw", "--quiet"])
            .expect("cli should parse");

        assert_eq!(cli.format, OutputFormat::Raw);
        assert!(cli.quiet);
        assert!(matches!(cli.command, Commands::Provision));
    }

    #[test]
    fn output_format_rejects_invalid_value() {
        let parsed = Cli::try_parse_from(["eppr", "--format", "xml", "verify"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn db_override_is_carried_into_flags() {
        let cli = Cli::try_parse_from(["eppr", "--db", "/tmp/site.db", "verify"])
            .expect("cli should parse");
        let flags: GlobalFlags = cli.global_flags();
        assert_eq!(flags.db.as_deref(), Some("/tmp/site.db"));
    }

    #[test]
    fn read_collects_repeated_conditions() {
        let cli = Cli::try_parse_from([
            "eppr",
            "read",
            "project",
            "--where",
            "proj_status=active",
            "--where",
            "proj_code=WO-1",
            "--limit",
            "5",
        ])
        .expect("cli should parse");

        let Commands::Read(args) = cli.command else {
            panic!("expected read");
        };
        assert_eq!(args.table, "project");
        assert_eq!(args.conditions, vec!["proj_status=active", "proj_code=WO-1"]);
        assert_eq!(args.limit, Some(5));
    }

    #[test]
    fn seed_project_is_optional() {
        let cli = Cli::try_parse_from(["eppr", "seed"]).expect("cli should parse");
        assert!(matches!(cli.command, Commands::Seed(ref args) if args.project.is_none()));

        let cli =
            Cli::try_parse_from(["eppr", "seed", "--project", "WO-1"]).expect("cli should parse");
        assert!(
            matches!(cli.command, Commands::Seed(ref args) if args.project.as_deref() == Some("WO-1"))
        );
    }

    #[test]
    fn project_add_parses_dates() {
        let cli = Cli::try_parse_from([
            "eppr",
            "project",
            "add",
            "--code",
            "WO-1",
            "--name",
            "Tank farm",
            "--start",
            "2025-01-06",
        ])
        .expect("cli should parse");

        let Commands::Project {
            action: ProjectCommands::Add(args),
        } = cli.command
        else {
            panic!("expected project add");
        };
        assert_eq!(args.code, "WO-1");
        assert_eq!(args.start, chrono::NaiveDate::from_ymd_opt(2025, 1, 6));
        assert_eq!(args.finish, None);
    }

    #[test]
    fn project_add_rejects_bad_date() {
        let parsed = Cli::try_parse_from([
            "eppr", "project", "add", "--code", "WO-1", "--name", "X", "--start", "06/01/2025",
        ]);
        assert!(parsed.is_err());
    }
}
