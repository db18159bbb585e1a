//! Simulated plagiarism check.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::{Detector, RandomScore, ScoreStrategy};
use crate::config::PlagiarismConfig;
use crate::models::{round_percent, PlagiarismReport, PlagiarismStatus, SourceMatch};

/// Sources the similarity is attributed to, with their share of the total
pub const MATCH_SOURCES: [(&str, f64); 3] = [
    ("IEEE Xplore Digital Library", 0.4),
    ("SpringerLink", 0.3),
    ("ArXiv Preprints", 0.3),
];

/// Plagiarism checker producing a similarity score and per-source matches
#[derive(Debug, Clone)]
pub struct PlagiarismChecker {
    latency: Duration,
    max_similarity: f64,
    warning_threshold: f64,
    strategy: Arc<dyn ScoreStrategy>,
}

impl PlagiarismChecker {
    /// Create a checker from configuration with random scoring
    pub fn new(config: &PlagiarismConfig) -> Self {
        Self {
            latency: Duration::from_millis(config.latency_ms),
            max_similarity: config.max_similarity,
            warning_threshold: config.warning_threshold,
            strategy: Arc::new(RandomScore),
        }
    }

    /// Replace the scoring strategy
    pub fn with_strategy(mut self, strategy: Arc<dyn ScoreStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the simulated latency
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Build a report for a raw similarity percentage
    pub fn report_for(&self, similarity: f64) -> PlagiarismReport {
        let status = if similarity < self.warning_threshold {
            PlagiarismStatus::Pass
        } else {
            PlagiarismStatus::Warning
        };

        let matches = MATCH_SOURCES
            .iter()
            .map(|(source, share)| SourceMatch {
                source: source.to_string(),
                similarity: round_percent(similarity * share),
            })
            .collect();

        PlagiarismReport {
            similarity: round_percent(similarity),
            status,
            matches,
        }
    }
}

impl Default for PlagiarismChecker {
    fn default() -> Self {
        Self::new(&PlagiarismConfig::default())
    }
}

#[async_trait]
impl Detector for PlagiarismChecker {
    type Report = PlagiarismReport;

    fn id(&self) -> &str {
        "plagiarism"
    }

    fn name(&self) -> &str {
        "Plagiarism Detection"
    }

    fn latency(&self) -> Duration {
        self.latency
    }

    fn evaluate(&self, content: &str) -> PlagiarismReport {
        let similarity = self.strategy.score(content, self.max_similarity);
        let report = self.report_for(similarity);
        tracing::info!(
            similarity = report.similarity,
            status = ?report.status,
            "Plagiarism check complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::FixedScore;

    fn checker(score: f64) -> PlagiarismChecker {
        PlagiarismChecker::default()
            .with_strategy(Arc::new(FixedScore(score)))
            .with_latency(Duration::ZERO)
    }

    #[test]
    fn test_pass_below_threshold() {
        let report = checker(4.26).evaluate("some abstract");

        assert_eq!(report.similarity, 4.3);
        assert_eq!(report.status, PlagiarismStatus::Pass);
        assert_eq!(report.status.label(), "Content appears original");
    }

    #[test]
    fn test_warning_at_threshold() {
        let report = checker(10.0).evaluate("some abstract");
        assert_eq!(report.status, PlagiarismStatus::Warning);
        assert_eq!(report.status.label(), "Minor similarities found");
    }

    #[test]
    fn test_match_breakdown() {
        let report = checker(10.0).evaluate("some abstract");
        let sources: Vec<&str> = report.matches.iter().map(|m| m.source.as_str()).collect();
        let shares: Vec<f64> = report.matches.iter().map(|m| m.similarity).collect();

        assert_eq!(
            sources,
            vec!["IEEE Xplore Digital Library", "SpringerLink", "ArXiv Preprints"]
        );
        assert_eq!(shares, vec![4.0, 3.0, 3.0]);
    }

    #[test]
    fn test_random_scores_stay_in_range() {
        let checker = PlagiarismChecker::default();
        for _ in 0..200 {
            let report = checker.evaluate("text");
            assert!(report.similarity >= 0.0 && report.similarity <= 15.0);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_check_waits_for_latency() {
        let checker = PlagiarismChecker::default()
            .with_strategy(Arc::new(FixedScore(2.0)))
            .with_latency(Duration::from_millis(3000));

        let started = tokio::time::Instant::now();
        let report = checker.check("abstract").await;

        assert!(started.elapsed() >= Duration::from_millis(3000));
        assert_eq!(report.similarity, 2.0);
    }
}
