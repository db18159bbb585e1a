//! Journal model representing one entry of the recommendation catalog.

use serde::{Deserialize, Serialize};

/// Impact factor at or above which a journal is badged as high impact.
pub const HIGH_IMPACT_THRESHOLD: f64 = 5.0;

/// A journal from the recommendation catalog
///
/// Records are immutable once a catalog has been loaded. The review time is
/// kept as display text and never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalRecord {
    /// Display name, unique within a catalog
    pub name: String,

    /// Scope description
    pub description: String,

    /// Journal impact factor
    pub impact_factor: f64,

    /// Acceptance rate as a whole percentage (0-100)
    pub acceptance_rate: u8,

    /// Article processing charge in currency units
    pub publishing_cost: u32,

    /// Typical review duration, e.g. "6-8 weeks"
    pub review_time: String,
}

impl JournalRecord {
    /// Create a new record with the required fields
    pub fn new(name: impl Into<String>, impact_factor: f64, publishing_cost: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            impact_factor,
            acceptance_rate: 0,
            publishing_cost,
            review_time: String::new(),
        }
    }

    /// Whether the journal carries the "High Impact" badge
    pub fn is_high_impact(&self) -> bool {
        self.impact_factor >= HIGH_IMPACT_THRESHOLD
    }

    /// Whether publishing is free of charge
    pub fn is_free(&self) -> bool {
        self.publishing_cost == 0
    }
}

/// Builder for constructing JournalRecord objects
#[derive(Debug, Clone)]
pub struct JournalRecordBuilder {
    record: JournalRecord,
}

impl JournalRecordBuilder {
    /// Create a new builder with required fields
    pub fn new(name: impl Into<String>, impact_factor: f64, publishing_cost: u32) -> Self {
        Self {
            record: JournalRecord::new(name, impact_factor, publishing_cost),
        }
    }

    /// Set description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.record.description = description.into();
        self
    }

    /// Set acceptance rate (percent)
    pub fn acceptance_rate(mut self, rate: u8) -> Self {
        self.record.acceptance_rate = rate;
        self
    }

    /// Set review time
    pub fn review_time(mut self, review_time: impl Into<String>) -> Self {
        self.record.review_time = review_time.into();
        self
    }

    /// Build the JournalRecord
    pub fn build(self) -> JournalRecord {
        self.record
    }
}
