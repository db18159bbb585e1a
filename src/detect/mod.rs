//! Simulated content checks.
//!
//! Both checks follow the same shape: wait for a configured latency, draw a
//! score in a bounded range from a [`ScoreStrategy`], and wrap it in a report
//! with canned labels. The submitted text is handed to the strategy but the
//! built-in strategies ignore it.
//!
//! # Scoring strategies
//!
//! - [`RandomScore`]: uniform draw in `[0, max)` (the default)
//! - [`FixedScore`]: a constant, for deterministic tests and demos
//!
//! Custom strategies implement [`ScoreStrategy`] and are injected with
//! `with_strategy` on each detector.

mod ai_content;
mod plagiarism;

pub use ai_content::{AiContentDetector, SECTION_WEIGHTS};
pub use plagiarism::{PlagiarismChecker, MATCH_SOURCES};

use async_trait::async_trait;
use std::time::Duration;

/// Produces a score for a piece of text, bounded by `max`
pub trait ScoreStrategy: Send + Sync + std::fmt::Debug {
    /// Score `text`; implementations return a value in `[0, max]`
    fn score(&self, text: &str, max: f64) -> f64;
}

/// Uniform random score in `[0, max)`, or zero when `max` is not positive
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomScore;

impl ScoreStrategy for RandomScore {
    fn score(&self, _text: &str, max: f64) -> f64 {
        fastrand::f64() * max.max(0.0)
    }
}

/// Always returns the same score, clamped to `[0, max]`
#[derive(Debug, Clone, Copy)]
pub struct FixedScore(pub f64);

impl ScoreStrategy for FixedScore {
    fn score(&self, _text: &str, max: f64) -> f64 {
        self.0.min(max).max(0.0)
    }
}

/// A simulated check over free text
///
/// Checks are infallible: [`Detector::check`] always resolves with a report
/// once the latency has elapsed.
#[async_trait]
pub trait Detector: Send + Sync + std::fmt::Debug {
    /// Report produced by this check
    type Report: Send;

    /// Unique identifier (e.g., "plagiarism")
    fn id(&self) -> &str;

    /// Human-readable name
    fn name(&self) -> &str;

    /// Artificial delay before a report is produced
    fn latency(&self) -> Duration;

    /// Build the report immediately, without the simulated delay
    fn evaluate(&self, content: &str) -> Self::Report;

    /// Run the check with its simulated delay
    async fn check(&self, content: &str) -> Self::Report {
        tracing::debug!(detector = self.id(), chars = content.len(), "Starting check");
        tokio::time::sleep(self.latency()).await;
        self.evaluate(content)
    }
}
