//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the herald binary.

mod auth;
mod commands;
mod run;
mod show;

pub use auth::handle_auth_command;
pub use commands::{AuthCommands, Cli, Commands};
pub use run::{RunArgs, run_dispatcher};
pub use show::show_entry;
