//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};

/// Logging options from the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingConfig {
    /// Debug level for Herald crates.
    pub verbose: bool,
    /// One JSON object per event instead of human-readable lines.
    pub json_logs: bool,
}

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise Herald crates log at `info`
/// (`debug` with `verbose`). Output goes to stderr so stdout stays free for
/// command output such as the dry-run caption.
pub fn init_logging(config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    let default_directives = if config.verbose {
        "info,herald=debug,herald_core=debug,herald_models=debug,herald_social=debug,herald_storage=debug"
    } else {
        "info"
    };

    let env_filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directives))?;

    let fmt_layer = if config.json_logs {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
