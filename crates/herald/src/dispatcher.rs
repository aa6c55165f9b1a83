//! The daily post dispatcher.
//!
//! One [`Dispatcher::run`] call is one run of the pipeline:
//!
//! ```text
//! Idle → Selecting → Rendering → ResolvingAsset → Publishing → Succeeded
//!            │           │              │              │
//!            └───────────┴──────────────┴──────────────┴────→ Failed(kind)
//! ```
//!
//! Stages are awaited strictly in sequence and nothing is retried. Every run
//! ends in exactly one [`RunOutcome`], is appended to the run log, and is
//! reported on a final log line naming the outcome.

use crate::{CaptionRenderer, RunLog, SlackNotifier};
use chrono::NaiveDate;
use herald_core::{
    CalendarEntry, ContentCalendar, PostingSchedule, PublishResult, RenderedPost, RunMode,
    RunOutcome, RunRecord, RunStage, SkipReason,
};
use herald_error::{
    ConfigError, FailureKind, HeraldError, HeraldErrorKind, HeraldResult, PublishError,
    PublishErrorKind,
};
use herald_interface::Publisher;
use herald_storage::AssetStore;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// Per-invocation options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Date whose entry is dispatched.
    pub date: NaiveDate,
    /// Dry-run or live.
    pub mode: RunMode,
    /// Ignore the posting schedule and the already-published check.
    pub force: bool,
}

impl RunOptions {
    /// Live run for `date`.
    pub fn live(date: NaiveDate) -> Self {
        Self {
            date,
            mode: RunMode::Live,
            force: false,
        }
    }

    /// Dry run for `date`.
    pub fn dry_run(date: NaiveDate) -> Self {
        Self {
            date,
            mode: RunMode::DryRun,
            force: false,
        }
    }

    /// Set the force flag.
    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// The record written to the run log.
    pub record: RunRecord,
    /// Generated caption, when rendering completed.
    pub caption: Option<String>,
}

impl RunReport {
    /// Terminal outcome of the run.
    pub fn outcome(&self) -> RunOutcome {
        self.record
            .outcome()
            .unwrap_or(RunOutcome::Failed(FailureKind::Misconfigured))
    }

    /// Process exit status for the run.
    pub fn exit_code(&self) -> u8 {
        self.outcome().exit_code()
    }
}

/// How a pipeline pass ended when it did not fail.
enum Completion {
    Done,
    Skipped(SkipReason),
}

/// Selects, renders, validates and publishes one calendar entry per run.
pub struct Dispatcher {
    calendar_path: PathBuf,
    renderer: CaptionRenderer,
    assets: Arc<dyn AssetStore>,
    publisher: Option<Arc<dyn Publisher>>,
    run_log: RunLog,
    schedule: PostingSchedule,
    notifier: Option<SlackNotifier>,
}

impl Dispatcher {
    /// Create a dispatcher without a publisher. Such a dispatcher can only
    /// complete dry runs; live runs fail as `Misconfigured`.
    pub fn new(
        calendar_path: impl Into<PathBuf>,
        renderer: CaptionRenderer,
        assets: Arc<dyn AssetStore>,
        run_log: RunLog,
    ) -> Self {
        Self {
            calendar_path: calendar_path.into(),
            renderer,
            assets,
            publisher: None,
            run_log,
            schedule: PostingSchedule::default(),
            notifier: None,
        }
    }

    /// Attach the publishing boundary.
    pub fn with_publisher(mut self, publisher: Arc<dyn Publisher>) -> Self {
        self.publisher = Some(publisher);
        self
    }

    /// Set the posting schedule.
    pub fn with_schedule(mut self, schedule: PostingSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Notify a Slack webhook about live outcomes.
    pub fn with_notifier(mut self, notifier: SlackNotifier) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// The run log this dispatcher writes to.
    pub fn run_log(&self) -> &RunLog {
        &self.run_log
    }

    /// Execute one run. Never returns an error: failures are captured in
    /// the report's record.
    #[instrument(skip(self), fields(date = %options.date, mode = %options.mode))]
    pub async fn run(&self, options: RunOptions) -> RunReport {
        let mut record = RunRecord::start(options.mode, options.date);
        let mut caption = None;
        let mut entry_title = None;

        match self
            .execute(&options, &mut record, &mut caption, &mut entry_title)
            .await
        {
            Ok(Completion::Done) => record.succeed(),
            Ok(Completion::Skipped(reason)) => record.skip(reason),
            Err(e) => {
                let kind = e
                    .failure_kind()
                    .unwrap_or_else(|| stage_failure(*record.stage()));
                record.fail(kind, e.cause_kind(), e.to_string());
            }
        }

        self.run_log.append(&record).await;
        announce(self.notifier.as_ref(), &record, entry_title.as_deref()).await;
        report_outcome(&record);

        RunReport { record, caption }
    }

    /// Close out a run that never started because the dispatcher could not
    /// be assembled (missing credentials, unreadable prompt). The failure is
    /// recorded, announced and reported like any other run.
    #[instrument(skip(run_log, notifier, err), fields(date = %options.date, mode = %options.mode))]
    pub async fn record_setup_failure(
        run_log: &RunLog,
        notifier: Option<&SlackNotifier>,
        options: RunOptions,
        err: &HeraldError,
    ) -> RunReport {
        let mut record = RunRecord::start(options.mode, options.date);
        let kind = err.failure_kind().unwrap_or(FailureKind::Misconfigured);
        record.fail(kind, None, err.to_string());

        run_log.append(&record).await;
        announce(notifier, &record, None).await;
        report_outcome(&record);

        RunReport {
            record,
            caption: None,
        }
    }

    async fn execute(
        &self,
        options: &RunOptions,
        record: &mut RunRecord,
        caption_out: &mut Option<String>,
        title_out: &mut Option<String>,
    ) -> HeraldResult<Completion> {
        // Selecting
        record.enter(RunStage::Selecting);
        let calendar = ContentCalendar::from_file(&self.calendar_path)?;
        let entry = calendar.entry_for(options.date)?;
        record.selected(entry);
        *title_out = Some(describe(entry));
        info!(
            entry = %entry.identifier(),
            category = %entry.category(),
            title = entry.display_title(),
            "Selected calendar entry"
        );

        if let Some(reason) = self.skip_reason(options, entry).await {
            info!(reason = %reason, "Skipping run");
            return Ok(Completion::Skipped(reason));
        }

        // Rendering
        record.enter(RunStage::Rendering);
        let caption = self.renderer.render(entry).await?;
        record.rendered(&caption);
        *caption_out = Some(caption.clone());

        // ResolvingAsset
        record.enter(RunStage::ResolvingAsset);
        let asset = self.assets.resolve(entry.image().as_deref()).await?;
        record.resolved(&asset);
        let post = RenderedPost::new(entry.identifier(), caption, asset);

        if options.mode == RunMode::DryRun {
            info!("Dry run: not publishing");
            return Ok(Completion::Done);
        }

        // Publishing
        let publisher = self
            .publisher
            .as_ref()
            .ok_or_else(|| ConfigError::new("Live run requested without a publisher"))?;
        record.enter(RunStage::Publishing);
        self.publish(publisher.as_ref(), &post, record).await?;

        Ok(Completion::Done)
    }

    /// Reason to stop after selection, unless forced.
    async fn skip_reason(&self, options: &RunOptions, entry: &CalendarEntry) -> Option<SkipReason> {
        if let Some(scheduled) = self.schedule.category_for(options.date) {
            if scheduled != *entry.category() {
                warn!(
                    scheduled = %scheduled,
                    entry = %entry.category(),
                    "Entry category differs from the posting schedule"
                );
            }
        }

        if options.force {
            return None;
        }

        if !self.schedule.allows(options.date) {
            return Some(SkipReason::NotPostingDay);
        }

        if options.mode == RunMode::Live {
            match self.run_log.find_published(&entry.identifier()).await {
                Ok(Some(previous)) => {
                    info!(
                        previous_run = %previous.run_id(),
                        post_id = ?previous.post_id(),
                        "Entry already published"
                    );
                    return Some(SkipReason::AlreadyPublished);
                }
                Ok(None) => {}
                Err(e) => warn!(error = %e, "Could not read run log; assuming not published"),
            }
        }

        None
    }

    /// Upload, then create. A failure after the upload went through is a
    /// partial failure and the upload is not repeated.
    async fn publish(
        &self,
        publisher: &dyn Publisher,
        post: &RenderedPost,
        record: &mut RunRecord,
    ) -> HeraldResult<()> {
        let handle = match publisher.upload_image(post.asset()).await {
            Ok(handle) => handle,
            Err(e) => {
                record.published(PublishResult::failed(None, e.to_string()));
                return Err(PublishError::new(upload_cause(e)).into());
            }
        };

        match publisher.create_post(post.caption(), &handle).await {
            Ok(post_id) => {
                info!(post_id = %post_id, platform = publisher.platform_name(), "Published");
                record.published(PublishResult::published(handle, post_id));
                Ok(())
            }
            Err(e) => {
                record.published(PublishResult::failed(Some(handle.clone()), e.to_string()));
                Err(PublishError::partial(handle.0, post_cause(e)).into())
            }
        }
    }
}

/// Send a live run's terminal outcome to Slack. Skips and dry runs are quiet.
async fn announce(notifier: Option<&SlackNotifier>, record: &RunRecord, title: Option<&str>) {
    let Some(notifier) = notifier else {
        return;
    };
    if *record.mode() != RunMode::Live {
        return;
    }

    let subject = title.unwrap_or("scheduled post");
    let (message, success) = match record.outcome() {
        Some(RunOutcome::Succeeded) => (
            format!(
                "Posted {} ({})",
                subject,
                record.post_id().map(|p| p.0.as_str()).unwrap_or("no id")
            ),
            true,
        ),
        Some(RunOutcome::Failed(kind)) => (
            format!(
                "FAILED to post {}: {}: {}",
                subject,
                kind,
                record.error().as_deref().unwrap_or("")
            ),
            false,
        ),
        Some(RunOutcome::Skipped(_)) | None => return,
    };

    if let Err(e) = notifier.notify(&message, success).await {
        warn!(error = %e, "Failed to send notification");
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("calendar_path", &self.calendar_path)
            .field("renderer", &self.renderer)
            .field("publisher", &self.publisher.as_ref().map(|p| p.platform_name()))
            .field("run_log", &self.run_log)
            .field("schedule", &self.schedule)
            .finish()
    }
}

/// Short human description of an entry for notifications.
fn describe(entry: &CalendarEntry) -> String {
    match entry.week() {
        Some(week) => format!(
            "Week {} {}: {}",
            week,
            entry.category(),
            entry.display_title()
        ),
        None => format!("{} {}: {}", entry.date(), entry.category(), entry.display_title()),
    }
}

/// Publish error of a failed upload. Nothing was posted, so anything a
/// publisher did not classify is an upload failure.
fn upload_cause(err: HeraldError) -> PublishErrorKind {
    match err.kind() {
        HeraldErrorKind::Publish(e) => e.kind.clone(),
        _ => PublishErrorKind::UploadFailed {
            status: None,
            message: err.to_string(),
        },
    }
}

/// Underlying publish error of a failed post creation.
fn post_cause(err: HeraldError) -> PublishErrorKind {
    match err.kind() {
        HeraldErrorKind::Publish(e) => e.kind.clone(),
        _ => PublishErrorKind::PostFailed {
            status: None,
            message: err.to_string(),
        },
    }
}

/// Failure kind for an error no boundary classified, by the stage it
/// escaped from.
fn stage_failure(stage: RunStage) -> FailureKind {
    match stage {
        RunStage::Idle | RunStage::Selecting => FailureKind::CalendarUnavailable,
        RunStage::Rendering => FailureKind::GenerationFailed,
        RunStage::ResolvingAsset => FailureKind::AssetInvalid,
        RunStage::Publishing => FailureKind::UploadFailed,
    }
}

/// Whether the operator must refresh the LinkedIn token, either because the
/// run failed on it or because a partial failure was caused by it.
fn needs_credential_refresh(record: &RunRecord) -> bool {
    let failed = match record.outcome() {
        Some(RunOutcome::Failed(kind)) => kind,
        _ => return false,
    };
    failed.needs_credential_refresh()
        || record.cause().is_some_and(|cause| cause.needs_credential_refresh())
}

/// The final log line of a run.
fn report_outcome(record: &RunRecord) {
    let entry = record.entry_id().as_deref().unwrap_or("-");
    match record.outcome() {
        Some(RunOutcome::Succeeded) => info!(
            run_id = %record.run_id(),
            entry,
            post_id = ?record.post_id(),
            "Run Succeeded"
        ),
        Some(RunOutcome::Skipped(reason)) => {
            info!(run_id = %record.run_id(), entry, reason = %reason, "Run Skipped")
        }
        Some(RunOutcome::Failed(kind)) => {
            let detail = record.error().as_deref().unwrap_or("");
            if needs_credential_refresh(record) {
                error!(
                    run_id = %record.run_id(),
                    entry,
                    stage = %record.stage(),
                    kind = %kind,
                    cause = ?record.cause(),
                    error = detail,
                    "Run Failed({}): refresh the LinkedIn access token with `herald auth`",
                    kind
                );
            } else {
                error!(
                    run_id = %record.run_id(),
                    entry,
                    stage = %record.stage(),
                    kind = %kind,
                    cause = ?record.cause(),
                    error = detail,
                    "Run Failed({})",
                    kind
                );
            }
        }
        None => {}
    }
}
