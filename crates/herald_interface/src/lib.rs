//! Boundary traits for Herald.
//!
//! The dispatcher talks to its two external services only through these
//! traits, so the pipeline can be exercised against in-process fakes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::{Publisher, TextGenerator};
