//! CLI command definitions.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Herald - publish today's calendar entry to LinkedIn
#[derive(Parser, Debug)]
#[command(name = "herald")]
#[command(about = "Publish today's content calendar entry to LinkedIn", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Additional configuration file, applied after the standard locations
    #[arg(long, global = true, env = "HERALD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Dispatch the entry scheduled for today (or --date)
    Run {
        /// Render and validate, but do not publish
        #[arg(long)]
        dry_run: bool,

        /// Dispatch the entry for this date instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Post even on off-schedule days or if the entry was already published
        #[arg(long)]
        force: bool,
    },

    /// Show the entry that would be dispatched, without any network call
    Show {
        /// Date to look up instead of today (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// LinkedIn credential maintenance
    #[command(subcommand)]
    Auth(AuthCommands),
}

/// Credential maintenance subcommands
#[derive(Subcommand, Debug)]
pub enum AuthCommands {
    /// Print the OAuth authorization URL to open in a browser
    Url,

    /// Exchange the authorization code from the callback for an access token
    Exchange {
        /// The `code` query parameter of the callback URL
        #[arg(long)]
        code: String,
    },

    /// Check the current access token and print the identity it belongs to
    Whoami,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_flags() {
        let cli = Cli::parse_from(["herald", "run", "--dry-run", "--date", "2024-06-02", "-v"]);
        assert!(cli.verbose);
        match cli.command {
            Commands::Run {
                dry_run,
                date,
                force,
            } => {
                assert!(dry_run);
                assert!(!force);
                assert_eq!(date, NaiveDate::from_ymd_opt(2024, 6, 2));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(Cli::try_parse_from(["herald", "run", "--date", "06/02/2024"]).is_err());
    }

    #[test]
    fn parses_auth_exchange() {
        let cli = Cli::parse_from(["herald", "auth", "exchange", "--code", "AQT123"]);
        assert!(matches!(
            cli.command,
            Commands::Auth(AuthCommands::Exchange { ref code }) if code == "AQT123"
        ));
    }

    #[test]
    fn verifies_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
