//! The fixed journal catalog recommendations are drawn from.
//!
//! A catalog is loaded once and never mutated afterwards. The built-in
//! catalog holds three journals; a replacement can be read from a TOML file:
//!
//! ```toml
//! [[journals]]
//! name = "Journal of Machine Learning Research"
//! description = "An open access journal covering machine learning research."
//! impact_factor = 6.1
//! acceptance_rate = 22
//! publishing_cost = 0
//! review_time = "10-12 weeks"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::models::{JournalRecord, JournalRecordBuilder};

/// An immutable, ordered set of journals
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    journals: Vec<JournalRecord>,
}

/// On-disk catalog layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    journals: Vec<JournalRecord>,
}

impl Catalog {
    /// Build a catalog from records, checking names and value ranges
    pub fn new(journals: Vec<JournalRecord>) -> Result<Self, CatalogError> {
        if journals.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for journal in &journals {
            if !seen.insert(journal.name.as_str()) {
                return Err(CatalogError::DuplicateName(journal.name.clone()));
            }
            if !journal.impact_factor.is_finite() || journal.impact_factor < 0.0 {
                return Err(CatalogError::InvalidRecord(format!(
                    "{}: impact factor must be a non-negative number",
                    journal.name
                )));
            }
            if journal.acceptance_rate > 100 {
                return Err(CatalogError::InvalidRecord(format!(
                    "{}: acceptance rate above 100%",
                    journal.name
                )));
            }
        }

        Ok(Self { journals })
    }

    /// The catalog shipped with the application
    pub fn builtin() -> Self {
        Self {
            journals: vec![
                JournalRecordBuilder::new("Nature Communications", 16.6, 5720)
                    .description("An open access journal publishing high-quality research across all areas of the natural sciences, including physics, chemistry, earth sciences, medicine, and biology.")
                    .acceptance_rate(8)
                    .review_time("8-10 weeks")
                    .build(),
                JournalRecordBuilder::new(
                    "IEEE Transactions on Pattern Analysis and Machine Intelligence",
                    24.3,
                    2095,
                )
                .description("Covers traditional and emerging areas within the field of computer vision and pattern recognition, including machine learning, neural networks, and image analysis.")
                .acceptance_rate(12)
                .review_time("6-8 weeks")
                .build(),
                JournalRecordBuilder::new("Journal of Machine Learning Research", 6.1, 0)
                    .description("An open access journal covering machine learning research including theory, algorithms, and applications across diverse scientific and engineering domains.")
                    .acceptance_rate(22)
                    .review_time("10-12 weeks")
                    .build(),
            ],
        }
    }

    /// Load a catalog from a TOML file
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CatalogError::Io(e.to_string()))?;
        Self::from_toml(&content)
    }

    /// Parse a catalog from TOML text
    pub fn from_toml(content: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile =
            toml::from_str(content).map_err(|e| CatalogError::Parse(e.to_string()))?;
        Self::new(file.journals)
    }

    /// Serialize the catalog back to TOML
    pub fn to_toml(&self) -> Result<String, CatalogError> {
        let file = CatalogFile {
            journals: self.journals.clone(),
        };
        toml::to_string_pretty(&file).map_err(|e| CatalogError::Parse(e.to_string()))
    }

    /// All journals in catalog order
    pub fn records(&self) -> &[JournalRecord] {
        &self.journals
    }

    /// Look a journal up by exact name
    pub fn get(&self, name: &str) -> Option<&JournalRecord> {
        self.journals.iter().find(|j| j.name == name)
    }

    /// The first `n` journals in catalog order (fewer if the catalog is smaller)
    pub fn head(&self, n: usize) -> &[JournalRecord] {
        &self.journals[..n.min(self.journals.len())]
    }

    /// Number of journals
    pub fn len(&self) -> usize {
        self.journals.len()
    }

    /// Always false for a constructed catalog; kept for API symmetry
    pub fn is_empty(&self) -> bool {
        self.journals.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Catalog loading errors
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Catalog contains no journals")]
    Empty,

    #[error("Duplicate journal name: {0}")]
    DuplicateName(String),

    #[error("Invalid journal record: {0}")]
    InvalidRecord(String),
}
