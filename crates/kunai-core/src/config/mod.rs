use anyhow::Result;
use config::{Config, ConfigBuilder, FileFormat, builder::DefaultState};
use serde::Deserialize;

use crate::constants::{DEFAULT_LOG_LEVEL, DEFAULT_ZONE};
use crate::error::{CoreError, CoreResult};


#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub recurrence: RecurrenceConfig,
    pub logging: LoggingConfig,
}

/// ## Summary
/// Options applied when reading and writing RECUR values.
///
/// `default_zone` is an opaque timezone identifier; it is resolved by the
/// caller's timezone lookup, never here.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecurrenceConfig {
    pub default_zone: String,
    pub fold_output_lines: bool,
    pub emit_week_start: bool,
}

impl Default for RecurrenceConfig {
    fn default() -> Self {
        Self {
            default_zone: DEFAULT_ZONE.to_string(),
            fold_output_lines: false,
            emit_week_start: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl LoggingConfig {
    /// ## Summary
    /// Parses the configured level into a `tracing::Level`.
    ///
    /// ## Errors
    /// Returns `CoreError::ConfigError` if the level name is not recognized.
    pub fn tracing_level(&self) -> CoreResult<tracing::Level> {
        self.level
            .parse()
            .map_err(|err| CoreError::ConfigError(format!("logging.level `{}`: {err}", self.level)))
    }
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and an optional `config.toml`.
    /// Environment variables (`KUNAI_RECURRENCE__DEFAULT_ZONE`, ...) take precedence
    /// over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            .add_source(config::File::with_name("config.toml").required(false))
            .add_source(
                config::Environment::with_prefix("KUNAI")
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?)
    }

    /// ## Summary
    /// Loads configuration from a TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or does not deserialize.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Self::builder()?
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>> {
        let defaults = RecurrenceConfig::default();
        Ok(Config::builder()
            .set_default("recurrence.default_zone", defaults.default_zone)?
            .set_default("recurrence.fold_output_lines", defaults.fold_output_lines)?
            .set_default("recurrence.emit_week_start", defaults.emit_week_start)?
            .set_default("logging.level", DEFAULT_LOG_LEVEL)?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(recurrence = ?settings.recurrence, "Configuration loaded");
    Ok(settings)
}
