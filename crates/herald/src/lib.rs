//! Herald - daily post dispatcher.
//!
//! Herald reads a content calendar, asks a language model to phrase the
//! day's entry, validates the entry's image and publishes both to LinkedIn.
//! Each invocation is one run; every run is recorded in an append-only JSONL
//! log and ends with a single outcome that maps to the process exit status.
//!
//! # Architecture
//!
//! Herald is organized as a workspace with focused crates:
//!
//! - `herald_error` - Error types and the run failure taxonomy
//! - `herald_core` - Calendar, post and run record types
//! - `herald_interface` - `TextGenerator` and `Publisher` boundary traits
//! - `herald_models` - Anthropic Messages API client
//! - `herald_storage` - Image asset resolution and validation
//! - `herald_social` - LinkedIn publishing and OAuth
//!
//! This crate wires them into a [`Dispatcher`] and re-exports everything for
//! convenience.
//!
//! # Example
//!
//! ```rust,no_run
//! use herald::{
//!     AnthropicClient, AssetLimits, CaptionRenderer, Dispatcher, FileSystemAssetStore,
//!     RunLog, RunOptions,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() {
//! let generator = Arc::new(AnthropicClient::new("sk-ant-...", "claude-sonnet-4-20250514"));
//! let renderer = CaptionRenderer::new(generator, herald::DEFAULT_SYSTEM_PROMPT, 1500, 3000);
//! let assets = Arc::new(FileSystemAssetStore::new("content/images", AssetLimits::default()));
//!
//! let dispatcher = Dispatcher::new(
//!     "content/calendar.json",
//!     renderer,
//!     assets,
//!     RunLog::in_dir("logs"),
//! );
//!
//! let today = chrono::Local::now().date_naive();
//! let report = dispatcher.run(RunOptions::dry_run(today)).await;
//! println!("{}", report.caption.unwrap_or_default());
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod dispatcher;
mod notify;
mod renderer;
mod run_log;
mod telemetry;

pub use config::{
    DEFAULT_SYSTEM_PROMPT, GenerationConfig, HeraldConfig, LinkedInSettings, NotifyConfig,
    PathsConfig, Secrets,
};
pub use dispatcher::{Dispatcher, RunOptions, RunReport};
pub use notify::SlackNotifier;
pub use renderer::CaptionRenderer;
pub use run_log::{RUN_LOG_FILE, RunLog};
pub use telemetry::{LoggingConfig, init_logging};

// Re-export workspace crates
pub use herald_core::*;
pub use herald_error::*;
pub use herald_interface::*;
pub use herald_models::*;
pub use herald_social::*;
pub use herald_storage::*;
