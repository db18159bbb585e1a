//! Journal recommendation filter.
//!
//! Applies the budget ceiling and minimum impact factor from
//! [`SearchCriteria`] to a [`Catalog`]. When no journal passes both
//! thresholds the first [`FALLBACK_COUNT`] catalog entries are shown instead,
//! so a search always displays something.
//!
//! Ranks are positions in the returned list, starting at 1.
//!
//! ```rust
//! use journal_finder::catalog::Catalog;
//! use journal_finder::models::SearchCriteria;
//! use journal_finder::recommend::filter;
//!
//! let criteria = SearchCriteria::new("Sparse attention", "We propose...", 3000, 5.0).unwrap();
//! let recommendation = filter(&Catalog::builtin(), &criteria);
//!
//! assert_eq!(recommendation.matched_count, 2);
//! assert_eq!(recommendation.notification(), "Found 2 matching journals");
//! ```

use crate::catalog::Catalog;
use crate::models::{JournalRecord, RankedResult, Recommendation, SearchCriteria};

/// Number of catalog entries shown when nothing matches
pub const FALLBACK_COUNT: usize = 3;

/// Filter the catalog and rank the survivors
///
/// `matched_count` on the result is the size of the filtered set before the
/// fallback is applied.
pub fn filter(catalog: &Catalog, criteria: &SearchCriteria) -> Recommendation {
    let matched: Vec<&JournalRecord> = catalog
        .records()
        .iter()
        .filter(|journal| criteria.accepts(journal))
        .collect();

    let matched_count = matched.len();
    let fallback = matched.is_empty();

    let selected: Vec<&JournalRecord> = if fallback {
        catalog.head(FALLBACK_COUNT).iter().collect()
    } else {
        matched
    };

    tracing::debug!(
        budget = criteria.budget(),
        min_impact_factor = criteria.min_impact_factor(),
        matched_count,
        fallback,
        "Filtered journal catalog"
    );

    Recommendation {
        results: rank(selected),
        matched_count,
        fallback,
    }
}

/// Assign positional ranks 1, 2, 3, ...
fn rank(journals: Vec<&JournalRecord>) -> Vec<RankedResult> {
    journals
        .into_iter()
        .enumerate()
        .map(|(index, journal)| RankedResult {
            rank: index + 1,
            journal: journal.clone(),
        })
        .collect()
}
