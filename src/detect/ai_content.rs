//! Simulated AI-generated content detection.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use super::{Detector, RandomScore, ScoreStrategy};
use crate::config::AiDetectionConfig;
use crate::models::{round_percent, AiContentStatus, AiDetectionReport, SectionScore};

/// Paper sections reported on, with their multiplier of the overall score
pub const SECTION_WEIGHTS: [(&str, f64); 4] = [
    ("Introduction", 0.8),
    ("Methodology", 1.2),
    ("Results", 0.9),
    ("Conclusion", 1.1),
];

/// Detector estimating the share of AI-generated text
#[derive(Debug, Clone)]
pub struct AiContentDetector {
    latency: Duration,
    max_probability: f64,
    mixed_threshold: f64,
    strategy: Arc<dyn ScoreStrategy>,
}

impl AiContentDetector {
    /// Create a detector from configuration with random scoring
    pub fn new(config: &AiDetectionConfig) -> Self {
        Self {
            latency: Duration::from_millis(config.latency_ms),
            max_probability: config.max_probability,
            mixed_threshold: config.mixed_threshold,
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

    /// Build a report for a raw AI probability percentage
    pub fn report_for(&self, ai_probability: f64) -> AiDetectionReport {
        let status = if ai_probability < self.mixed_threshold {
            AiContentStatus::Human
        } else {
            AiContentStatus::Mixed
        };

        // Sections are always labelled human, whatever the overall verdict
        let sections = SECTION_WEIGHTS
            .iter()
            .map(|(name, weight)| SectionScore {
                name: name.to_string(),
                ai_score: round_percent(ai_probability * weight),
                status: AiContentStatus::Human,
            })
            .collect();

        AiDetectionReport {
            ai_probability: round_percent(ai_probability),
            human_probability: round_percent(100.0 - ai_probability),
            status,
            sections,
        }
    }
}

impl Default for AiContentDetector {
    fn default() -> Self {
        Self::new(&AiDetectionConfig::default())
    }
}

#[async_trait]
impl Detector for AiContentDetector {
    type Report = AiDetectionReport;

    fn id(&self) -> &str {
        "ai_detection"
    }

    fn name(&self) -> &str {
        "AI Content Detection"
    }

    fn latency(&self) -> Duration {
        self.latency
    }

    fn evaluate(&self, content: &str) -> AiDetectionReport {
        let probability = self.strategy.score(content, self.max_probability);
        let report = self.report_for(probability);
        tracing::info!(
            ai_probability = report.ai_probability,
            status = ?report.status,
            "AI content check complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::FixedScore;

    fn detector(score: f64) -> AiContentDetector {
        AiContentDetector::default()
            .with_strategy(Arc::new(FixedScore(score)))
            .with_latency(Duration::ZERO)
    }

    #[test]
    fn test_human_verdict() {
        let report = detector(8.7).evaluate("abstract");

        assert_eq!(report.ai_probability, 8.7);
        assert_eq!(report.human_probability, 91.3);
        assert_eq!(report.status, AiContentStatus::Human);
        assert_eq!(report.headline(), "91.3% Human-Written");
    }

    #[test]
    fn test_mixed_verdict() {
        let report = detector(15.0).evaluate("abstract");
        assert_eq!(report.status, AiContentStatus::Mixed);
        assert_eq!(report.status.label(), "Some AI patterns detected");
    }

    #[test]
    fn test_section_breakdown() {
        let report = detector(10.0).evaluate("abstract");
        let names: Vec<&str> = report.sections.iter().map(|s| s.name.as_str()).collect();
        let scores: Vec<f64> = report.sections.iter().map(|s| s.ai_score).collect();

        assert_eq!(names, vec!["Introduction", "Methodology", "Results", "Conclusion"]);
        assert_eq!(scores, vec![8.0, 12.0, 9.0, 11.0]);
        assert!(report
            .sections
            .iter()
            .all(|s| s.status == AiContentStatus::Human));
    }

    #[test]
    fn test_probabilities_sum_to_hundred() {
        let detector = AiContentDetector::default();
        for _ in 0..200 {
            let report = detector.evaluate("text");
            assert!(report.ai_probability <= 20.0);
            let total = report.ai_probability + report.human_probability;
            assert!((total - 100.0).abs() < 0.11);
        }
    }

    #[tokio::test]
    async fn test_check_resolves() {
        let report = detector(1.0).check("abstract").await;
        assert_eq!(report.ai_probability, 1.0);
    }
}
