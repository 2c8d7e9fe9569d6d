//! Command-line interface for `gorodplus`.
//!
//! This module provides the CLI parsing and command routing using clap.
//! The same [`SessionCommand`] set is parsed both from `argv` and from each
//! line of the interactive shell.

pub mod commands;

use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use gorodplus_lib::{IssueId, Snapshot, Status};
use tracing::info;

use crate::config::CliOverrides;
use crate::logging;
use crate::output::OutputContext;
use crate::session::Session;

/// `gorodplus` (gp) - civic issue board.
#[derive(Parser, Debug)]
#[command(name = "gp")]
#[command(
    author,
    version,
    about = "Report, vote on and map city problems",
    long_about = None,
    after_help = "State lives in memory: use `gp shell` to keep it across commands."
)]
pub struct Cli {
    /// Output format: text (default) or json
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Read configuration from this YAML file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Start from a JSON Lines seed file instead of the demo issues
    #[arg(long, global = true, value_name = "PATH")]
    pub seed: Option<PathBuf>,

    /// Start with no issues
    #[arg(long, global = true, conflicts_with = "seed")]
    pub empty: bool,

    /// Date stamped on new submissions (YYYY-MM-DD)
    #[arg(long, global = true, hide = true, env = "GORODPLUS_TODAY")]
    pub today: Option<NaiveDate>,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            config: self.config.clone(),
            seed: self.seed.clone(),
            empty: self.empty,
            today: self.today,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Session(SessionCommand),

    /// Interactive session; state persists between lines
    Shell,

    /// Print JSON Schema for the output types
    Schema(SchemaArgs),

    /// Generate a shell completion script
    Completions(CompletionsArgs),
}

/// Commands that read or change the issue board.
#[derive(Subcommand, Debug, Clone)]
pub enum SessionCommand {
    /// List issues
    #[command(alias = "ls")]
    List(StatusFilterArgs),

    /// Show map markers and tile settings
    Map(StatusFilterArgs),

    /// Show the first few issues as on the profile tab
    Profile(ProfileArgs),

    /// Summary statistics (alias: status)
    #[command(alias = "status")]
    Stats,

    /// Report a new issue
    Submit(SubmitArgs),

    /// Vote for one or more issues
    Vote(VoteArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct StatusFilterArgs {
    /// Only issues with this status: pending, in-progress, resolved (repeatable)
    #[arg(long, short, value_name = "STATUS")]
    pub status: Vec<Status>,
}

impl StatusFilterArgs {
    /// Narrow `snapshot` to the requested statuses; no statuses keeps everything.
    #[must_use]
    pub fn apply(&self, snapshot: &Snapshot) -> Snapshot {
        if self.status.is_empty() {
            return snapshot.clone();
        }
        snapshot.filter(|issue| self.status.contains(&issue.status))
    }
}

#[derive(Args, Debug, Clone)]
pub struct ProfileArgs {
    /// Number of issues to show (default from config)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Args, Debug, Clone)]
pub struct SubmitArgs {
    /// Short title
    #[arg(long, short, default_value = "")]
    pub title: String,

    /// What is wrong
    #[arg(long, short, default_value = "")]
    pub description: String,

    /// Street address or landmark
    #[arg(long, short, default_value = "")]
    pub location: String,

    /// Category (default from config)
    #[arg(long, short)]
    pub category: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct VoteArgs {
    /// Issue ids, e.g. `3` or `#3`
    #[arg(required = true, num_args = 1..)]
    pub ids: Vec<IssueId>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaTarget {
    #[default]
    All,
    Issue,
    Statistics,
    Card,
    Map,
}

#[derive(Args, Debug)]
pub struct SchemaArgs {
    /// Which type to describe
    #[arg(value_enum, default_value_t = SchemaTarget::All)]
    pub target: SchemaTarget,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

/// Run the CLI.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose, cli.quiet, cli.json)?;
    let ctx = OutputContext::from_flags(cli.json);

    match cli.command {
        Some(Commands::Schema(ref args)) => commands::schema::execute(args, &ctx),
        Some(Commands::Completions(ref args)) => {
            commands::completions::execute(args);
            Ok(())
        }
        Some(Commands::Shell) => {
            let mut session = Session::open(&cli.overrides())?;
            info!(issues = session.store().len(), "Shell session started");
            commands::shell::execute(&mut session, &ctx)
        }
        Some(Commands::Session(ref command)) => {
            let mut session = Session::open(&cli.overrides())?;
            execute_session_command(command, &mut session, &ctx)
        }
        None => {
            let mut session = Session::open(&cli.overrides())?;
            let list = SessionCommand::List(StatusFilterArgs::default());
            execute_session_command(&list, &mut session, &ctx)
        }
    }
}

/// Route one board command. Shared by `argv` dispatch and the shell.
///
/// # Errors
///
/// Returns an error if the command fails; the session is left as the store left it.
pub fn execute_session_command(
    command: &SessionCommand,
    session: &mut Session,
    ctx: &OutputContext,
) -> Result<()> {
    match command {
        SessionCommand::List(args) => commands::list::execute(args, session, ctx),
        SessionCommand::Map(args) => commands::map::execute(args, session, ctx),
        SessionCommand::Profile(args) => commands::profile::execute(args, session, ctx),
        SessionCommand::Stats => commands::stats::execute(session, ctx),
        SessionCommand::Submit(args) => commands::submit::execute(args, session, ctx),
        SessionCommand::Vote(args) => commands::vote::execute(args, session, ctx),
    }
}

impl SessionCommand {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Profile(_) => "profile",
            Self::Stats => "stats",
            Self::Submit(_) => "submit",
            Self::Vote(_) => "vote",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_vote_ids() {
        let cli = Cli::try_parse_from(["gp", "vote", "1", "#3"]).unwrap();
        match cli.command {
            Some(Commands::Session(SessionCommand::Vote(args))) => {
                assert_eq!(args.ids, vec![IssueId(1), IssueId(3)]);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_vote_requires_an_id() {
        assert!(Cli::try_parse_from(["gp", "vote"]).is_err());
        assert!(Cli::try_parse_from(["gp", "vote", "abc"]).is_err());
    }

    #[test]
    fn test_submit_fields_default_to_empty() {
        let cli = Cli::try_parse_from(["gp", "submit", "--title", "Pothole"]).unwrap();
        let Some(Commands::Session(SessionCommand::Submit(args))) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(args.title, "Pothole");
        assert!(args.description.is_empty());
        assert!(args.category.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["gp", "stats", "--json", "--empty", "-vv"]).unwrap();
        assert!(cli.json);
        assert!(cli.empty);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(
            cli.command,
            Some(Commands::Session(SessionCommand::Stats))
        ));
    }

    #[test]
    fn test_empty_conflicts_with_seed() {
        assert!(Cli::try_parse_from(["gp", "--empty", "--seed", "x.jsonl", "list"]).is_err());
    }

    #[test]
    fn test_status_filter_parses_aliases() {
        let args = ["gp", "list", "--status", "in_progress", "-s", "resolved"];
        let cli = Cli::try_parse_from(args).unwrap();
        let Some(Commands::Session(SessionCommand::List(filter))) = cli.command else {
            panic!("expected list");
        };
        assert_eq!(filter.status, vec![Status::InProgress, Status::Resolved]);

        let filtered = filter.apply(&gorodplus_lib::IssueStore::seeded().snapshot());
        let ids: Vec<IssueId> = filtered.iter().map(|issue| issue.id).collect();
        assert_eq!(ids, vec![IssueId(1), IssueId(3)]);
    }

    #[test]
    fn test_unknown_status_filter_is_rejected() {
        let err = Cli::try_parse_from(["gp", "map", "--status", "closed"]).unwrap_err();
        assert!(err.to_string().contains("Invalid status: closed"));
    }

    #[test]
    fn test_status_alias() {
        let cli = Cli::try_parse_from(["gp", "status"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Session(SessionCommand::Stats))
        ));
    }
}
