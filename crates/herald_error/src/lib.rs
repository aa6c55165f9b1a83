//! Error types for Herald.
//!
//! This crate provides the error types shared by every Herald crate.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! Every error can be classified into a [`FailureKind`], the vocabulary used
//! by the run log and the process exit status.
//!
//! # Examples
//!
//! ```
//! use herald_error::{CalendarError, CalendarErrorKind, FailureKind, HeraldResult};
//!
//! fn select() -> HeraldResult<()> {
//!     Err(CalendarError::new(CalendarErrorKind::NotFound("2024-06-03".into())))?
//! }
//!
//! let err = select().unwrap_err();
//! assert_eq!(err.failure_kind(), Some(FailureKind::NotFound));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod auth;
mod calendar;
mod config;
mod error;
mod failure;
mod generation;
mod http;
mod json;
mod publish;
mod run_log;

pub use asset::{AssetError, AssetErrorKind};
pub use auth::{AuthError, AuthErrorKind};
pub use calendar::{CalendarError, CalendarErrorKind};
pub use config::ConfigError;
pub use error::{HeraldError, HeraldErrorKind, HeraldResult};
pub use failure::FailureKind;
pub use generation::{GenerationError, GenerationErrorKind};
pub use http::HttpError;
pub use json::JsonError;
pub use publish::{PublishError, PublishErrorKind};
pub use run_log::RunLogError;
