//! Configuration file support for journal-finder.
//!
//! The file is TOML; every key is optional and falls back to its default.
//! Environment variables (`JOURNAL_FINDER_<SECTION>__<KEY>`) take precedence
//! when loading through [`load_config`](super::load_config).
//!
//! # Configuration File Format
//!
//! ```toml
//! [search]
//! default_budget = 3000
//! default_min_impact_factor = 5.0
//! latency_ms = 2000
//!
//! [plagiarism]
//! latency_ms = 3000
//! max_similarity = 15.0
//! warning_threshold = 10.0
//!
//! [ai_detection]
//! latency_ms = 3000
//! max_probability = 20.0
//! mixed_threshold = 15.0
//!
//! [chat]
//! latency_ms = 1500
//!
//! [catalog]
//! path = "journals.toml"
//!
//! [session]
//! path = "/tmp/journal-finder-session.json"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```

use std::path::Path;

use super::Config;

/// The configuration file is a TOML rendering of [`Config`]
pub type ConfigFile = Config;

impl Config {
    /// Load configuration from a TOML file, without environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigFileError::Parse(e.to_string()))
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigFileError> {
        toml::to_string_pretty(self).map_err(|e| ConfigFileError::Serialize(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<(), ConfigFileError> {
        let content = self.to_toml()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigFileError::Io(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| ConfigFileError::Io(e.to_string()))
    }
}

/// Configuration file errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
