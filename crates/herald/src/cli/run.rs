//! Dispatcher run command handler.

use chrono::NaiveDate;
use herald::{
    AnthropicClient, CaptionRenderer, ConfigError, Dispatcher, FileSystemAssetStore,
    HeraldConfig, HeraldResult, LinkedInClient, LinkedInConfig, RunLog, RunMode, RunOptions,
    RunOutcome, Secrets, SlackNotifier,
};
use std::sync::Arc;
use tracing::info;

/// Arguments of `herald run`.
#[derive(Debug, Clone, Copy)]
pub struct RunArgs {
    /// Render and validate only.
    pub dry_run: bool,
    /// Date override.
    pub date: Option<NaiveDate>,
    /// Ignore schedule and idempotency checks.
    pub force: bool,
}

/// Build the dispatcher from configuration and execute one run.
///
/// Returns the process exit status. A dispatcher that cannot be assembled
/// still produces a run record, failed as `Misconfigured`.
pub async fn run_dispatcher(
    config: &HeraldConfig,
    secrets: &Secrets,
    args: RunArgs,
) -> HeraldResult<u8> {
    let mode = if args.dry_run {
        RunMode::DryRun
    } else {
        RunMode::Live
    };
    let date = args.date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let options = RunOptions {
        date,
        mode,
        force: args.force,
    };
    info!(date = %date, mode = %mode, force = args.force, "Starting run");

    let run_log = RunLog::in_dir(config.paths().log_dir());
    let notifier = secrets
        .slack_webhook_url()
        .as_ref()
        .map(|webhook| SlackNotifier::new(webhook, config.notify().username()));

    let dispatcher = match build_dispatcher(config, secrets, mode, run_log.clone()) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            let report =
                Dispatcher::record_setup_failure(&run_log, notifier.as_ref(), options, &e).await;
            return Ok(report.exit_code());
        }
    };
    let dispatcher = match notifier {
        Some(notifier) => dispatcher.with_notifier(notifier),
        None => dispatcher,
    };

    let report = dispatcher.run(options).await;

    if mode == RunMode::DryRun {
        if let Some(caption) = &report.caption {
            println!("{}", caption);
        }
    }
    if let RunOutcome::Skipped(reason) = report.outcome() {
        println!("Skipped: {}", reason);
    }

    Ok(report.exit_code())
}

/// Assemble the clients a run of `mode` needs.
fn build_dispatcher(
    config: &HeraldConfig,
    secrets: &Secrets,
    mode: RunMode,
    run_log: RunLog,
) -> HeraldResult<Dispatcher> {
    let api_key = Secrets::require(secrets.anthropic_api_key(), "ANTHROPIC_API_KEY")?;
    let generator = Arc::new(
        AnthropicClient::new(api_key, config.generation().model())
            .with_base_url(config.generation().api_base()),
    );
    let renderer = CaptionRenderer::new(
        generator,
        config.system_prompt()?,
        *config.generation().max_tokens(),
        *config.generation().caption_limit(),
    );

    let assets = Arc::new(FileSystemAssetStore::new(
        config.paths().images(),
        config.assets().clone(),
    ));

    let mut dispatcher = Dispatcher::new(config.paths().calendar(), renderer, assets, run_log)
        .with_schedule(config.schedule().clone());

    if mode == RunMode::Live {
        let token = Secrets::require(secrets.linkedin_access_token(), "LINKEDIN_ACCESS_TOKEN")?;
        let linkedin = LinkedInConfig::builder()
            .access_token(token)
            .author_urn(config.linkedin().author_urn().clone())
            .person_id(secrets.linkedin_person_id().clone())
            .api_base(config.linkedin().api_base())
            .media_title(config.linkedin().media_title())
            .build()
            .map_err(|e| ConfigError::new(format!("Invalid LinkedIn settings: {}", e)))?;
        dispatcher = dispatcher.with_publisher(Arc::new(LinkedInClient::new(linkedin)));
    }

    Ok(dispatcher)
}
