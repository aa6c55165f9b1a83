//! Herald CLI binary.
//!
//! - `herald run` dispatches today's calendar entry (cron entry point)
//! - `herald show` previews the entry without network calls
//! - `herald auth` maintains the LinkedIn access token

use clap::Parser;
use herald::{HeraldConfig, HeraldResult, LoggingConfig, Secrets, init_logging};
use std::process::ExitCode;
use tracing::error;

mod cli;

use cli::{Cli, Commands, RunArgs, handle_auth_command, run_dispatcher, show_entry};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    if let Err(e) = init_logging(LoggingConfig {
        verbose: cli.verbose,
        json_logs: cli.json_logs,
    }) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match execute(cli).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            let kind = e.failure_kind();
            match kind {
                Some(kind) => error!(kind = %kind, error = %e, "Failed({})", kind),
                None => error!(error = %e, "Failed"),
            }
            ExitCode::from(kind.map(|k| k.exit_code()).unwrap_or(1))
        }
    }
}

async fn execute(cli: Cli) -> HeraldResult<u8> {
    let secrets = Secrets::from_env();
    let config = HeraldConfig::load(cli.config.as_deref())?;

    // Execute the requested command
    match cli.command {
        Commands::Run {
            dry_run,
            date,
            force,
        } => {
            run_dispatcher(
                &config,
                &secrets,
                RunArgs {
                    dry_run,
                    date,
                    force,
                },
            )
            .await
        }

        Commands::Show { date } => {
            show_entry(&config, date).await?;
            Ok(0)
        }

        Commands::Auth(auth_cmd) => {
            handle_auth_command(auth_cmd, &config, &secrets).await?;
            Ok(0)
        }
    }
}
