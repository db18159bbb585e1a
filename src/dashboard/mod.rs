//! The dashboard: filter controls, searches, checks and the assistant.
//!
//! [`Dashboard`] holds everything a user session works with: the catalog,
//! the current budget and impact-factor controls, the last result of each
//! operation and the assistant conversation. Each operation kind runs
//! through its own [`RequestSlot`], so at most one request of a kind is
//! pending and a request whose dialog was closed never writes its result.
//!
//! All methods take `&self`; share a dashboard between tasks with `Arc`.

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::catalog::{Catalog, CatalogError};
use crate::chat::{ChatBot, Conversation};
use crate::config::Config;
use crate::detect::{AiContentDetector, Detector, PlagiarismChecker};
use crate::models::{
    AiDetectionReport, ChatMessage, PlagiarismReport, Recommendation, SearchCriteria,
};
use crate::recommend;
use crate::tasks::{RequestSlot, TaskError};
use crate::utils::{clamp_budget, clamp_impact_factor, ValidationError};

/// Current values of the filter controls
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filters {
    pub budget: u32,
    pub min_impact_factor: f64,
}

/// Session-wide state and operations
#[derive(Debug)]
pub struct Dashboard {
    catalog: Catalog,
    search_latency: Duration,
    filters: Mutex<Filters>,
    plagiarism: PlagiarismChecker,
    ai_detector: AiContentDetector,
    chatbot: ChatBot,
    conversation: Mutex<Conversation>,
    searches: RequestSlot<Recommendation>,
    plagiarism_reports: RequestSlot<PlagiarismReport>,
    ai_reports: RequestSlot<AiDetectionReport>,
    replies: RequestSlot<ChatMessage>,
}

impl Dashboard {
    /// Create a dashboard over `catalog` with settings from `config`
    pub fn new(config: &Config, catalog: Catalog) -> Self {
        Self {
            catalog,
            search_latency: Duration::from_millis(config.search.latency_ms),
            filters: Mutex::new(Filters {
                budget: clamp_budget(config.search.default_budget),
                min_impact_factor: clamp_impact_factor(config.search.default_min_impact_factor),
            }),
            plagiarism: PlagiarismChecker::new(&config.plagiarism),
            ai_detector: AiContentDetector::new(&config.ai_detection),
            chatbot: ChatBot::new(&config.chat),
            conversation: Mutex::new(Conversation::new()),
            searches: RequestSlot::new("search"),
            plagiarism_reports: RequestSlot::new("plagiarism"),
            ai_reports: RequestSlot::new("ai_detection"),
            replies: RequestSlot::new("chat"),
        }
    }

    /// Create a dashboard, loading the catalog named in `config` if any
    pub fn from_config(config: &Config) -> Result<Self, CatalogError> {
        let catalog = match &config.catalog.path {
            Some(path) => {
                tracing::info!("Loading catalog from {}", path.display());
                Catalog::load(path)?
            }
            None => Catalog::builtin(),
        };
        Ok(Self::new(config, catalog))
    }

    /// Replace the plagiarism checker
    pub fn with_plagiarism_checker(mut self, checker: PlagiarismChecker) -> Self {
        self.plagiarism = checker;
        self
    }

    /// Replace the AI content detector
    pub fn with_ai_detector(mut self, detector: AiContentDetector) -> Self {
        self.ai_detector = detector;
        self
    }

    /// Replace the assistant
    pub fn with_chatbot(mut self, chatbot: ChatBot) -> Self {
        self.chatbot = chatbot;
        self
    }

    /// Replace the simulated search latency
    pub fn with_search_latency(mut self, latency: Duration) -> Self {
        self.search_latency = latency;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn filters_lock(&self) -> MutexGuard<'_, Filters> {
        self.filters.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn conversation_lock(&self) -> MutexGuard<'_, Conversation> {
        self.conversation
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Current filter values
    pub fn filters(&self) -> Filters {
        *self.filters_lock()
    }

    /// Set the budget ceiling, clamped to the control's range
    ///
    /// Returns the value actually stored.
    pub fn set_budget(&self, budget: u32) -> u32 {
        let budget = clamp_budget(budget);
        self.filters_lock().budget = budget;
        budget
    }

    /// Set the minimum impact factor, clamped to the control's range
    ///
    /// Returns the value actually stored.
    pub fn set_min_impact_factor(&self, value: f64) -> f64 {
        let value = clamp_impact_factor(value);
        self.filters_lock().min_impact_factor = value;
        value
    }

    /// Search the catalog with the current filters
    ///
    /// A blank title or abstract fails immediately with
    /// [`ValidationError::MissingSubmission`]: no latency, no request, no scan.
    pub async fn search(
        &self,
        title: &str,
        abstract_text: &str,
    ) -> Result<Recommendation, DashboardError> {
        let filters = self.filters();
        let criteria = SearchCriteria::new(
            title,
            abstract_text,
            filters.budget,
            filters.min_impact_factor,
        )?;

        self.search_with(criteria).await
    }

    /// Search the catalog with explicit criteria, ignoring the filter controls
    pub async fn search_with(
        &self,
        criteria: SearchCriteria,
    ) -> Result<Recommendation, DashboardError> {
        let latency = self.search_latency;
        let recommendation = self
            .searches
            .run(async {
                tokio::time::sleep(latency).await;
                recommend::filter(&self.catalog, &criteria)
            })
            .await?;

        tracing::info!(
            results = recommendation.len(),
            fallback = recommendation.fallback,
            "{}",
            recommendation.notification()
        );
        Ok(recommendation)
    }

    /// Result of the last completed search
    pub fn last_recommendation(&self) -> Option<Recommendation> {
        self.searches.result()
    }

    /// Whether a search is pending
    pub fn is_searching(&self) -> bool {
        self.searches.is_busy()
    }

    /// Run the plagiarism check on `content`
    pub async fn check_plagiarism(&self, content: &str) -> Result<PlagiarismReport, DashboardError> {
        let report = self
            .plagiarism_reports
            .run(self.plagiarism.check(content))
            .await?;
        Ok(report)
    }

    /// Close the plagiarism dialog, discarding a pending check
    pub fn close_plagiarism(&self) -> bool {
        self.plagiarism_reports.invalidate().is_some()
    }

    /// Report of the last completed plagiarism check
    pub fn plagiarism_report(&self) -> Option<PlagiarismReport> {
        self.plagiarism_reports.result()
    }

    /// Run the AI content detector on `content`
    pub async fn detect_ai_content(
        &self,
        content: &str,
    ) -> Result<AiDetectionReport, DashboardError> {
        let report = self.ai_reports.run(self.ai_detector.check(content)).await?;
        Ok(report)
    }

    /// Close the AI detection dialog, discarding a pending check
    pub fn close_ai_detection(&self) -> bool {
        self.ai_reports.invalidate().is_some()
    }

    /// Report of the last completed AI content check
    pub fn ai_detection_report(&self) -> Option<AiDetectionReport> {
        self.ai_reports.result()
    }

    /// Send a message to the assistant and wait for its reply
    ///
    /// Whitespace-only input is ignored and yields `Ok(None)`. While a reply
    /// is pending, further messages are rejected as busy.
    pub async fn send_chat(&self, message: &str) -> Result<Option<ChatMessage>, DashboardError> {
        if message.trim().is_empty() {
            return Ok(None);
        }

        let reply = self
            .replies
            .run(async {
                self.conversation_lock().push_user(message);
                self.chatbot.reply(message).await
            })
            .await?;

        self.conversation_lock().push_reply(reply.clone());
        Ok(Some(reply))
    }

    /// Close the assistant dialog, discarding a pending reply
    ///
    /// The transcript is kept.
    pub fn close_chat(&self) -> bool {
        self.replies.invalidate().is_some()
    }

    /// Whether the assistant is typing
    pub fn is_typing(&self) -> bool {
        self.replies.is_busy()
    }

    /// The assistant transcript, oldest message first
    pub fn conversation(&self) -> Vec<ChatMessage> {
        self.conversation_lock().messages().to_vec()
    }
}

/// Dashboard operation errors
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A {0} request is already in progress")]
    Busy(&'static str),

    #[error("The {0} request was cancelled")]
    Cancelled(&'static str),
}

impl From<TaskError> for DashboardError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Busy(kind) => DashboardError::Busy(kind),
            TaskError::Cancelled(kind) => DashboardError::Cancelled(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::{FixedReply, CANNED_REPLIES, GREETING};
    use crate::detect::FixedScore;
    use crate::models::{ChatRole, PlagiarismStatus};
    use std::sync::Arc;

    fn dashboard() -> Dashboard {
        Dashboard::new(&Config::default(), Catalog::builtin())
            .with_search_latency(Duration::ZERO)
            .with_plagiarism_checker(
                PlagiarismChecker::default()
                    .with_strategy(Arc::new(FixedScore(4.0)))
                    .with_latency(Duration::ZERO),
            )
            .with_ai_detector(
                AiContentDetector::default()
                    .with_strategy(Arc::new(FixedScore(6.0)))
                    .with_latency(Duration::ZERO),
            )
            .with_chatbot(
                ChatBot::default()
                    .with_strategy(Arc::new(FixedReply(3)))
                    .with_latency(Duration::ZERO),
            )
    }

    #[test]
    fn test_default_filters() {
        let dashboard = dashboard();
        assert_eq!(
            dashboard.filters(),
            Filters {
                budget: 3000,
                min_impact_factor: 5.0
            }
        );
    }

    #[test]
    fn test_filter_setters_clamp() {
        let dashboard = dashboard();
        assert_eq!(dashboard.set_budget(9000), 5000);
        assert_eq!(dashboard.set_min_impact_factor(-1.0), 0.0);
        assert_eq!(dashboard.set_min_impact_factor(12.5), 10.0);
        assert_eq!(dashboard.set_budget(250), 250);
        assert_eq!(dashboard.filters().budget, 250);
    }

    #[tokio::test]
    async fn test_search_uses_current_filters() {
        let dashboard = dashboard();
        let recommendation = dashboard.search("Deep nets", "We study...").await.unwrap();

        assert_eq!(recommendation.matched_count, 2);
        assert_eq!(
            recommendation.names(),
            vec![
                "IEEE Transactions on Pattern Analysis and Machine Intelligence",
                "Journal of Machine Learning Research"
            ]
        );
        assert_eq!(dashboard.last_recommendation(), Some(recommendation));
    }

    #[tokio::test]
    async fn test_search_validation_has_no_effect() {
        let dashboard = dashboard();
        let err = dashboard.search("  ", "abstract").await.unwrap_err();

        assert!(matches!(
            err,
            DashboardError::Validation(ValidationError::MissingSubmission)
        ));
        assert_eq!(err.to_string(), "Please enter both title and abstract");
        assert!(dashboard.last_recommendation().is_none());
        assert!(!dashboard.is_searching());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_search_rejected_while_pending() {
        let dashboard = Arc::new(
            Dashboard::new(&Config::default(), Catalog::builtin())
                .with_search_latency(Duration::from_millis(2000)),
        );

        let first = {
            let dashboard = Arc::clone(&dashboard);
            tokio::spawn(async move { dashboard.search("t", "a").await })
        };
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert!(dashboard.is_searching());
        assert!(matches!(
            dashboard.search("t", "a").await,
            Err(DashboardError::Busy("search"))
        ));

        assert!(first.await.unwrap().is_ok());
        assert!(!dashboard.is_searching());
    }

    #[tokio::test]
    async fn test_checks_store_reports() {
        let dashboard = dashboard();

        let plagiarism = dashboard.check_plagiarism("text").await.unwrap();
        assert_eq!(plagiarism.similarity, 4.0);
        assert_eq!(plagiarism.status, PlagiarismStatus::Pass);
        assert_eq!(dashboard.plagiarism_report(), Some(plagiarism));

        let ai = dashboard.detect_ai_content("text").await.unwrap();
        assert_eq!(ai.human_probability, 94.0);
        assert_eq!(dashboard.ai_detection_report(), Some(ai));
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_check_drops_late_report() {
        let dashboard = Arc::new(dashboard().with_plagiarism_checker(
            PlagiarismChecker::default()
                .with_strategy(Arc::new(FixedScore(12.0)))
                .with_latency(Duration::from_millis(3000)),
        ));

        let pending = {
            let dashboard = Arc::clone(&dashboard);
            tokio::spawn(async move { dashboard.check_plagiarism("text").await })
        };
        tokio::time::sleep(Duration::from_millis(1000)).await;

        assert!(dashboard.close_plagiarism());
        assert!(!dashboard.close_plagiarism());

        let outcome = pending.await.unwrap();
        assert!(matches!(outcome, Err(DashboardError::Cancelled("plagiarism"))));
        assert!(dashboard.plagiarism_report().is_none());
    }

    #[tokio::test]
    async fn test_chat_appends_messages() {
        let dashboard = dashboard();

        assert_eq!(dashboard.send_chat("   ").await.unwrap(), None);
        assert_eq!(dashboard.conversation().len(), 1);

        let reply = dashboard.send_chat("How long is review?").await.unwrap().unwrap();
        assert_eq!(reply.content, CANNED_REPLIES[3]);

        let transcript = dashboard.conversation();
        assert_eq!(transcript.len(), 3);
        assert_eq!(transcript[0].content, GREETING);
        assert_eq!(transcript[1].role, ChatRole::User);
        assert_eq!(transcript[1].content, "How long is review?");
        assert_eq!(transcript[2], reply);
    }

    #[tokio::test(start_paused = true)]
    async fn test_closed_chat_drops_late_reply() {
        let dashboard = Arc::new(dashboard().with_chatbot(
            ChatBot::default().with_latency(Duration::from_millis(1500)),
        ));

        let pending = {
            let dashboard = Arc::clone(&dashboard);
            tokio::spawn(async move { dashboard.send_chat("hello").await })
        };
        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(dashboard.is_typing());

        dashboard.close_chat();
        assert!(matches!(
            pending.await.unwrap(),
            Err(DashboardError::Cancelled("chat"))
        ));

        // The user message stays, the reply never arrives
        let transcript = dashboard.conversation();
        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript[1].role, ChatRole::User);
    }

    #[tokio::test]
    async fn test_from_config_loads_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journals.toml");
        std::fs::write(
            &path,
            r#"
[[journals]]
name = "Open Letters"
description = "Short communications"
impact_factor = 1.2
acceptance_rate = 40
publishing_cost = 0
review_time = "2 weeks"
"#,
        )
        .unwrap();

        let mut config = Config::default();
        config.catalog.path = Some(path);
        config.search.latency_ms = 0;

        let dashboard = Dashboard::from_config(&config).unwrap();
        assert_eq!(dashboard.catalog().len(), 1);

        let recommendation = dashboard.search("t", "a").await.unwrap();
        assert!(recommendation.fallback);
        assert_eq!(recommendation.names(), vec!["Open Letters"]);
    }
}
