//! Search criteria and recommendation models.

use serde::{Deserialize, Serialize};

use super::JournalRecord;
use crate::utils::{validate_submission, ValidationError};

/// Default budget ceiling offered by the filter controls
pub const DEFAULT_BUDGET: u32 = 3000;

/// Default minimum impact factor offered by the filter controls
pub const DEFAULT_MIN_IMPACT_FACTOR: f64 = 5.0;

/// Validated search parameters for one search invocation
///
/// A `SearchCriteria` can only be obtained through [`SearchCriteria::new`],
/// so a value of this type always carries a non-blank title and abstract.
/// The numeric thresholds are taken as given.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchCriteria {
    title: String,
    r#abstract: String,
    budget: u32,
    min_impact_factor: f64,
}

impl SearchCriteria {
    /// Validate and build search criteria
    pub fn new(
        title: impl Into<String>,
        abstract_text: impl Into<String>,
        budget: u32,
        min_impact_factor: f64,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let abstract_text = abstract_text.into();

        validate_submission(&title, &abstract_text)?;

        Ok(Self {
            title,
            r#abstract: abstract_text,
            budget,
            min_impact_factor,
        })
    }

    /// Paper title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Paper abstract
    pub fn abstract_text(&self) -> &str {
        &self.r#abstract
    }

    /// Maximum acceptable publishing cost
    pub fn budget(&self) -> u32 {
        self.budget
    }

    /// Minimum acceptable impact factor
    pub fn min_impact_factor(&self) -> f64 {
        self.min_impact_factor
    }

    /// Whether a journal passes both thresholds
    pub fn accepts(&self, journal: &JournalRecord) -> bool {
        journal.publishing_cost <= self.budget && journal.impact_factor >= self.min_impact_factor
    }
}

/// A journal paired with its 1-based position in the result list
///
/// The rank is positional, not a merit score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// 1-based position
    pub rank: usize,

    /// The recommended journal
    #[serde(flatten)]
    pub journal: JournalRecord,
}

/// Outcome of a recommendation search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Ranked journals to display
    pub results: Vec<RankedResult>,

    /// Number of journals that satisfied the filter, counted before any
    /// fallback substitution
    pub matched_count: usize,

    /// Whether the fallback slice replaced an empty match set
    pub fallback: bool,
}

impl Recommendation {
    /// User-facing summary, e.g. "Found 2 matching journals"
    ///
    /// Reports `matched_count`, so a fallback search reports 0 even though
    /// results are shown.
    pub fn notification(&self) -> String {
        format!("Found {} matching journals", self.matched_count)
    }

    /// Number of journals displayed
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether no journal is displayed
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Names of the displayed journals, in rank order
    pub fn names(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.journal.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_accepts() {
        let criteria = SearchCriteria::new("Title", "Abstract", 3000, 5.0).unwrap();

        assert!(criteria.accepts(&JournalRecord::new("cheap and good", 6.1, 0)));
        assert!(criteria.accepts(&JournalRecord::new("on the edge", 5.0, 3000)));
        assert!(!criteria.accepts(&JournalRecord::new("too expensive", 16.6, 5720)));
        assert!(!criteria.accepts(&JournalRecord::new("too weak", 4.9, 100)));
    }

    #[test]
    fn test_criteria_rejects_blank_title() {
        let err = SearchCriteria::new("   ", "Abstract", 3000, 5.0).unwrap_err();
        assert_eq!(err, ValidationError::MissingSubmission);
        assert_eq!(err.to_string(), "Please enter both title and abstract");
    }

    #[test]
    fn test_criteria_keeps_thresholds_as_given() {
        let criteria = SearchCriteria::new("T", "A", 100, 20.0).unwrap();
        assert_eq!(criteria.budget(), 100);
        assert_eq!(criteria.min_impact_factor(), 20.0);
    }

    #[test]
    fn test_notification_uses_matched_count() {
        let recommendation = Recommendation {
            results: vec![RankedResult {
                rank: 1,
                journal: JournalRecord::new("A", 1.0, 1),
            }],
            matched_count: 0,
            fallback: true,
        };

        assert_eq!(recommendation.notification(), "Found 0 matching journals");
        assert_eq!(recommendation.len(), 1);
    }

    #[test]
    fn test_ranked_result_serializes_flat() {
        let ranked = RankedResult {
            rank: 2,
            journal: JournalRecord::new("JMLR", 6.1, 0),
        };
        let value = serde_json::to_value(&ranked).unwrap();
        assert_eq!(value["rank"], 2);
        assert_eq!(value["name"], "JMLR");
    }
}
