//! Run state and the run log record.

use crate::{CalendarEntry, ImageAsset, PostCategory, PublishResult};
use chrono::{DateTime, NaiveDate, Utc};
use derive_getters::Getters;
use herald_error::FailureKind;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Whether a run publishes or stops short of the publish boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// Select, render and validate, but never publish.
    #[display("dry-run")]
    DryRun,
    /// Execute every stage.
    #[display("live")]
    Live,
}

/// Pipeline stages, in execution order.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    /// Nothing started yet.
    #[display("Idle")]
    Idle,
    /// Looking up today's calendar entry.
    #[display("Selecting")]
    Selecting,
    /// Generating the caption.
    #[display("Rendering")]
    Rendering,
    /// Locating and validating the image.
    #[display("ResolvingAsset")]
    ResolvingAsset,
    /// Uploading the image and creating the post.
    #[display("Publishing")]
    Publishing,
}

/// Why a run ended without doing anything.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The run date is not a configured posting day.
    #[display("not a posting day")]
    NotPostingDay,
    /// The run log already holds a successful publish of this entry.
    #[display("entry already published")]
    AlreadyPublished,
}

/// Terminal state of a run.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display,
)]
#[serde(tag = "status", content = "kind", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Every stage completed.
    #[display("Succeeded")]
    Succeeded,
    /// Nothing to do.
    #[display("Skipped ({})", _0)]
    Skipped(SkipReason),
    /// Terminated by a failure.
    #[display("Failed({})", _0)]
    Failed(FailureKind),
}

impl RunOutcome {
    /// Process exit status for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Succeeded | Self::Skipped(_) => 0,
            Self::Failed(kind) => kind.exit_code(),
        }
    }
}

/// One line of the run log.
///
/// A record is opened when the run starts, filled in as stages complete and
/// closed exactly once with a terminal outcome.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct RunRecord {
    /// Unique id of this run.
    run_id: Uuid,
    /// Dry-run or live.
    mode: RunMode,
    /// Date the run selected for.
    run_date: NaiveDate,
    /// Last stage entered.
    stage: RunStage,
    /// Terminal outcome, absent while in flight.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    outcome: Option<RunOutcome>,
    /// Identifier of the selected entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    entry_id: Option<String>,
    /// Category of the selected entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    category: Option<PostCategory>,
    /// Caption length in characters.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    caption_chars: Option<usize>,
    /// Image digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    asset_sha256: Option<String>,
    /// Image size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    asset_bytes: Option<u64>,
    /// Publish attempt result.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    publish: Option<PublishResult>,
    /// Underlying failure for partial failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cause: Option<FailureKind>,
    /// Error detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    /// When the run started.
    started_at: DateTime<Utc>,
    /// When the run reached its outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    finished_at: Option<DateTime<Utc>>,
}

impl RunRecord {
    /// Open a record for a new run.
    pub fn start(mode: RunMode, run_date: NaiveDate) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            mode,
            run_date,
            stage: RunStage::Idle,
            outcome: None,
            entry_id: None,
            category: None,
            caption_chars: None,
            asset_sha256: None,
            asset_bytes: None,
            publish: None,
            cause: None,
            error: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Move to the next stage. Stages only move forward.
    pub fn enter(&mut self, stage: RunStage) {
        debug_assert!(stage > self.stage, "{} cannot follow {}", stage, self.stage);
        debug_assert!(self.outcome.is_none(), "run already finished");
        self.stage = stage;
    }

    /// Note the selected entry.
    pub fn selected(&mut self, entry: &CalendarEntry) {
        self.entry_id = Some(entry.identifier());
        self.category = Some(*entry.category());
    }

    /// Note the generated caption.
    pub fn rendered(&mut self, caption: &str) {
        self.caption_chars = Some(caption.chars().count());
    }

    /// Note the validated image.
    pub fn resolved(&mut self, asset: &ImageAsset) {
        self.asset_sha256 = Some(asset.sha256().clone());
        self.asset_bytes = Some(asset.size());
    }

    /// Note the publish attempt.
    pub fn published(&mut self, result: PublishResult) {
        self.publish = Some(result);
    }

    /// Close the record as succeeded.
    pub fn succeed(&mut self) {
        self.finish(RunOutcome::Succeeded);
    }

    /// Close the record as skipped.
    pub fn skip(&mut self, reason: SkipReason) {
        self.finish(RunOutcome::Skipped(reason));
    }

    /// Close the record as failed.
    pub fn fail(&mut self, kind: FailureKind, cause: Option<FailureKind>, error: impl Into<String>) {
        self.cause = cause;
        self.error = Some(error.into());
        self.finish(RunOutcome::Failed(kind));
    }

    fn finish(&mut self, outcome: RunOutcome) {
        debug_assert!(self.outcome.is_none(), "run already finished");
        self.outcome = Some(outcome);
        self.finished_at = Some(Utc::now());
    }

    /// Whether this record shows a live run that created a post.
    pub fn is_published(&self) -> bool {
        self.mode == RunMode::Live
            && self.outcome == Some(RunOutcome::Succeeded)
            && self.publish.as_ref().is_some_and(|p| *p.success())
    }

    /// Remote post id, when a post was created.
    pub fn post_id(&self) -> Option<&crate::PostId> {
        self.publish.as_ref().and_then(|p| p.post_id().as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PostId, UploadHandle};

    fn june_2() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 2).unwrap()
    }

    #[test]
    fn stages_are_ordered() {
        assert!(RunStage::Idle < RunStage::Selecting);
        assert!(RunStage::Rendering < RunStage::ResolvingAsset);
        assert!(RunStage::ResolvingAsset < RunStage::Publishing);
    }

    #[test]
    fn published_record_round_trips_as_json_line() {
        let mut record = RunRecord::start(RunMode::Live, june_2());
        record.enter(RunStage::Selecting);
        record.enter(RunStage::Publishing);
        record.published(PublishResult::published(
            UploadHandle("urn:li:digitalmediaAsset:1".into()),
            PostId("urn:li:share:9".into()),
        ));
        record.succeed();

        let line = serde_json::to_string(&record).unwrap();
        assert!(!line.contains('\n'));
        let parsed: RunRecord = serde_json::from_str(&line).unwrap();
        assert!(parsed.is_published());
        assert_eq!(parsed.post_id().map(|p| p.0.as_str()), Some("urn:li:share:9"));
    }

    #[test]
    fn failed_outcome_names_kind_in_json() {
        let mut record = RunRecord::start(RunMode::Live, june_2());
        record.enter(RunStage::Selecting);
        record.fail(FailureKind::NotFound, None, "No post scheduled for 2024-06-02");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["outcome"]["status"], "failed");
        assert_eq!(json["outcome"]["kind"], "not_found");
        assert_eq!(record.outcome().map(|o| o.exit_code()), Some(2));
        assert!(!record.is_published());
    }

    #[test]
    fn dry_run_success_is_not_a_publish() {
        let mut record = RunRecord::start(RunMode::DryRun, june_2());
        record.succeed();
        assert!(!record.is_published());
        assert_eq!(RunOutcome::Succeeded.exit_code(), 0);
    }
}
