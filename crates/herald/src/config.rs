//! Herald configuration.
//!
//! Settings are layered with the `config` crate, later sources overriding
//! earlier ones:
//! 1. Bundled defaults (include_str! from herald.toml)
//! 2. `~/.config/herald/herald.toml`
//! 3. `./herald.toml`
//! 4. An explicit `--config` file, when given
//! 5. `HERALD_<SECTION>__<KEY>` environment variables
//!
//! Secrets are never read from these files. They come from the process
//! environment (optionally seeded from `.env`) into [`Secrets`].

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use herald_core::PostingSchedule;
use herald_error::{ConfigError, HeraldError, HeraldResult};
use herald_models::ANTHROPIC_API_BASE;
use herald_social::LINKEDIN_API_BASE;
use herald_storage::AssetLimits;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../herald.toml");

/// Bundled style directive, used when no `paths.system_prompt` is set.
pub const DEFAULT_SYSTEM_PROMPT: &str = include_str!("../../../templates/system_prompt.txt");

/// File locations.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Content calendar (JSON array).
    calendar: PathBuf,
    /// Directory image references are resolved against.
    images: PathBuf,
    /// Directory holding `runs.jsonl`.
    log_dir: PathBuf,
    /// Style directive file; the bundled prompt is used when absent.
    #[serde(default)]
    system_prompt: Option<PathBuf>,
}

/// Text-generation settings.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Model identifier.
    model: String,
    /// Token ceiling per generation.
    max_tokens: u32,
    /// Longest caption accepted, in characters.
    caption_limit: usize,
    /// Anthropic API host.
    #[serde(default = "default_anthropic_base")]
    api_base: String,
}

/// LinkedIn settings. The access token is a secret and lives in [`Secrets`].
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct LinkedInSettings {
    /// REST host.
    #[serde(default = "default_linkedin_base")]
    api_base: String,
    /// Title attached to the post image.
    media_title: String,
    /// Explicit author URN, e.g. an organization page.
    #[serde(default)]
    author_urn: Option<String>,
}

/// Notification settings. The webhook URL is a secret.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// Display name of the notification sender.
    username: String,
}

fn default_anthropic_base() -> String {
    ANTHROPIC_API_BASE.to_string()
}

fn default_linkedin_base() -> String {
    LINKEDIN_API_BASE.to_string()
}

/// Top-level Herald configuration.
///
/// # Example
///
/// ```no_run
/// use herald::HeraldConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = HeraldConfig::load(None)?;
/// println!("Calendar: {}", config.paths().calendar().display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct HeraldConfig {
    /// File locations
    paths: PathsConfig,
    /// Text generation
    generation: GenerationConfig,
    /// Publishing
    linkedin: LinkedInSettings,
    /// Image validation
    #[serde(default)]
    assets: AssetLimits,
    /// Weekly posting schedule
    #[serde(default)]
    schedule: PostingSchedule,
    /// Notifications
    notify: NotifyConfig,
}

impl HeraldConfig {
    /// Load configuration with the full precedence chain.
    ///
    /// `explicit` is an additional file that must exist; the conventional
    /// locations are optional and skipped when absent.
    #[instrument(skip(explicit), fields(explicit = ?explicit))]
    pub fn load(explicit: Option<&Path>) -> HeraldResult<Self> {
        debug!("Loading configuration: env > explicit > ./herald.toml > home > bundled");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(config_dir) = dirs::config_dir() {
            let home_config = config_dir.join("herald/herald.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("herald").required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("HERALD")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Self::finish(builder)
    }

    /// Bundled defaults overlaid with a TOML document. No files or
    /// environment variables are consulted.
    pub fn from_toml(overrides: &str) -> HeraldResult<Self> {
        let builder = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from_str(overrides, FileFormat::Toml));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> HeraldResult<Self> {
        let config: Self = builder
            .build()
            .map_err(|e| {
                HeraldError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                HeraldError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> HeraldResult<()> {
        if self.generation.max_tokens == 0 {
            return Err(ConfigError::new("generation.max_tokens must be positive").into());
        }
        if self.generation.caption_limit == 0 {
            return Err(ConfigError::new("generation.caption_limit must be positive").into());
        }
        if self.assets.formats().is_empty() {
            return Err(ConfigError::new("assets.formats must name at least one format").into());
        }
        Ok(())
    }

    /// The style directive: the configured file, or the bundled prompt.
    ///
    /// # Errors
    ///
    /// `Misconfigured` when a configured prompt file cannot be read.
    pub fn system_prompt(&self) -> HeraldResult<String> {
        match &self.paths.system_prompt {
            None => Ok(DEFAULT_SYSTEM_PROMPT.to_string()),
            Some(path) => std::fs::read_to_string(path).map_err(|e| {
                ConfigError::new(format!(
                    "Failed to read system prompt {}: {}",
                    path.display(),
                    e
                ))
                .into()
            }),
        }
    }
}

/// Credentials read once at startup.
#[derive(Clone, Default, Getters)]
pub struct Secrets {
    /// `ANTHROPIC_API_KEY`
    anthropic_api_key: Option<String>,
    /// `LINKEDIN_ACCESS_TOKEN`
    linkedin_access_token: Option<String>,
    /// `LINKEDIN_PERSON_ID`
    linkedin_person_id: Option<String>,
    /// `LINKEDIN_CLIENT_ID`
    linkedin_client_id: Option<String>,
    /// `LINKEDIN_CLIENT_SECRET`
    linkedin_client_secret: Option<String>,
    /// `SLACK_WEBHOOK_URL`
    slack_webhook_url: Option<String>,
}

impl Secrets {
    /// Read secrets from the process environment, after loading `.env` if
    /// one is present.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            debug!(path = %path.display(), "Loaded .env");
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read secrets through a lookup function. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        Self {
            anthropic_api_key: get("ANTHROPIC_API_KEY"),
            linkedin_access_token: get("LINKEDIN_ACCESS_TOKEN"),
            linkedin_person_id: get("LINKEDIN_PERSON_ID"),
            linkedin_client_id: get("LINKEDIN_CLIENT_ID"),
            linkedin_client_secret: get("LINKEDIN_CLIENT_SECRET"),
            slack_webhook_url: get("SLACK_WEBHOOK_URL"),
        }
    }

    /// A secret that the current command cannot run without.
    ///
    /// # Errors
    ///
    /// `Misconfigured` naming the missing variable.
    pub fn require<'a>(value: &'a Option<String>, name: &str) -> HeraldResult<&'a str> {
        value
            .as_deref()
            .ok_or_else(|| ConfigError::new(format!("{} not set", name)).into())
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shown = |v: &Option<String>| if v.is_some() { "<set>" } else { "<unset>" };
        f.debug_struct("Secrets")
            .field("anthropic_api_key", &shown(&self.anthropic_api_key))
            .field("linkedin_access_token", &shown(&self.linkedin_access_token))
            .field("linkedin_person_id", &self.linkedin_person_id)
            .field("linkedin_client_id", &self.linkedin_client_id)
            .field("linkedin_client_secret", &shown(&self.linkedin_client_secret))
            .field("slack_webhook_url", &shown(&self.slack_webhook_url))
            .finish()
    }
}
