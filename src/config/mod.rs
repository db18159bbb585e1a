//! Configuration management.

mod file_config;

pub use file_config::{ConfigFile, ConfigFileError};

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "JOURNAL_FINDER";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Search defaults and latency
    #[serde(default)]
    pub search: SearchConfig,

    /// Plagiarism check settings
    #[serde(default)]
    pub plagiarism: PlagiarismConfig,

    /// AI content detection settings
    #[serde(default)]
    pub ai_detection: AiDetectionConfig,

    /// Assistant settings
    #[serde(default)]
    pub chat: ChatConfig,

    /// Journal catalog source
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Session file location
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Search configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Initial budget ceiling
    #[serde(default = "default_budget")]
    pub default_budget: u32,

    /// Initial minimum impact factor
    #[serde(default = "default_min_impact_factor")]
    pub default_min_impact_factor: f64,

    /// Simulated search latency in milliseconds
    #[serde(default = "default_search_latency")]
    pub latency_ms: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_budget: default_budget(),
            default_min_impact_factor: default_min_impact_factor(),
            latency_ms: default_search_latency(),
        }
    }
}

fn default_budget() -> u32 {
    crate::models::DEFAULT_BUDGET
}

fn default_min_impact_factor() -> f64 {
    crate::models::DEFAULT_MIN_IMPACT_FACTOR
}

fn default_search_latency() -> u64 {
    2000
}

/// Plagiarism check configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiarismConfig {
    /// Simulated check latency in milliseconds
    #[serde(default = "default_check_latency")]
    pub latency_ms: u64,

    /// Upper bound of the similarity percentage
    #[serde(default = "default_max_similarity")]
    pub max_similarity: f64,

    /// Similarity at or above which the check warns
    #[serde(default = "default_warning_threshold")]
    pub warning_threshold: f64,
}

impl Default for PlagiarismConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_check_latency(),
            max_similarity: default_max_similarity(),
            warning_threshold: default_warning_threshold(),
        }
    }
}

fn default_check_latency() -> u64 {
    3000
}

fn default_max_similarity() -> f64 {
    15.0
}

fn default_warning_threshold() -> f64 {
    10.0
}

/// AI content detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiDetectionConfig {
    /// Simulated check latency in milliseconds
    #[serde(default = "default_check_latency")]
    pub latency_ms: u64,

    /// Upper bound of the AI probability percentage
    #[serde(default = "default_max_probability")]
    pub max_probability: f64,

    /// AI probability at or above which content is reported as mixed
    #[serde(default = "default_mixed_threshold")]
    pub mixed_threshold: f64,
}

impl Default for AiDetectionConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_check_latency(),
            max_probability: default_max_probability(),
            mixed_threshold: default_mixed_threshold(),
        }
    }
}

fn default_max_probability() -> f64 {
    20.0
}

fn default_mixed_threshold() -> f64 {
    15.0
}

/// Assistant configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Simulated typing delay in milliseconds
    #[serde(default = "default_chat_latency")]
    pub latency_ms: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_chat_latency(),
        }
    }
}

fn default_chat_latency() -> u64 {
    1500
}

/// Catalog configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML catalog replacing the built-in journals
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Session configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Session file override
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// `"json"` for JSON log lines, plain text otherwise
    #[serde(default)]
    pub format: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: None,
        }
    }
}

impl Config {
    /// Reject score ceilings the simulated checks cannot draw from
    pub fn validate(&self) -> Result<(), config::ConfigError> {
        let ceilings = [
            ("plagiarism.max_similarity", self.plagiarism.max_similarity),
            ("ai_detection.max_probability", self.ai_detection.max_probability),
        ];
        for (key, value) in ceilings {
            if !value.is_finite() || value < 0.0 {
                return Err(config::ConfigError::Message(format!(
                    "'{}' must be a non-negative number, got {}",
                    key, value
                )));
            }
        }
        Ok(())
    }
}

impl LoggingConfig {
    /// Whether JSON log lines are requested
    pub fn is_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|format| format.eq_ignore_ascii_case("json"))
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load configuration from an optional file plus `JOURNAL_FINDER_*` variables
///
/// Nested keys use a double underscore, e.g.
/// `JOURNAL_FINDER_SEARCH__LATENCY_MS=500`.
pub fn load_config(path: Option<&Path>) -> Result<Config, config::ConfigError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let config: Config = settings.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Default location of the user configuration file
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("journal-finder").join("config.toml"))
}

/// Find a configuration file in the default locations
///
/// Looks for `./journal-finder.toml`, then the user configuration file.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from("journal-finder.toml");
    if local.is_file() {
        return Some(local);
    }

    user_config_path().filter(|path| path.is_file())
}
