//! Core data types for Herald.
//!
//! This crate holds the content calendar model, the generation request types
//! and the records a dispatcher run produces (rendered posts, publish results
//! and run log records).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod asset;
mod calendar;
mod category;
mod entry;
mod post;
mod publish;
mod request;
mod run;
mod schedule;

pub use asset::{ImageAsset, ImageFormat};
pub use calendar::ContentCalendar;
pub use category::PostCategory;
pub use entry::{CalendarEntry, CalendarEntryBuilder};
pub use post::RenderedPost;
pub use publish::{PostId, PublishResult, UploadHandle};
pub use request::{GenerateRequest, GenerateRequestBuilder, GenerateResponse};
pub use run::{RunMode, RunOutcome, RunRecord, RunStage, SkipReason};
pub use schedule::PostingSchedule;
