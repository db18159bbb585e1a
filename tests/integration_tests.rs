//! Integration tests for Journal Finder
//!
//! These tests exercise the library end to end: the recommendation scenarios,
//! the dashboard request lifecycle, the session guard and the MCP tools.

use journal_finder::catalog::Catalog;
use journal_finder::chat::{ChatBot, FixedReply, CANNED_REPLIES};
use journal_finder::config::Config;
use journal_finder::dashboard::{Dashboard, DashboardError};
use journal_finder::detect::{AiContentDetector, FixedScore, PlagiarismChecker};
use journal_finder::mcp::{McpServer, ToolRegistry};
use journal_finder::models::{PlagiarismStatus, SearchCriteria};
use journal_finder::recommend;
use journal_finder::session::{SessionError, SessionStore};
use journal_finder::utils::ValidationError;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

const NATURE: &str = "Nature Communications";
const TPAMI: &str = "IEEE Transactions on Pattern Analysis and Machine Intelligence";
const JMLR: &str = "Journal of Machine Learning Research";

/// Configuration with every simulated delay removed
fn instant_config() -> Config {
    let mut config = Config::default();
    config.search.latency_ms = 0;
    config.plagiarism.latency_ms = 0;
    config.ai_detection.latency_ms = 0;
    config.chat.latency_ms = 0;
    config
}

#[test]
fn test_scenario_default_filters() {
    let criteria = SearchCriteria::new("A paper", "An abstract", 3000, 5.0).unwrap();
    let recommendation = recommend::filter(&Catalog::builtin(), &criteria);

    assert_eq!(recommendation.names(), vec![TPAMI, JMLR]);
    assert_eq!(
        recommendation.results.iter().map(|r| r.rank).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert!(!recommendation.fallback);
    assert_eq!(recommendation.notification(), "Found 2 matching journals");
}

#[test]
fn test_scenario_nothing_matches() {
    let criteria = SearchCriteria::new("A paper", "An abstract", 100, 20.0).unwrap();
    let recommendation = recommend::filter(&Catalog::builtin(), &criteria);

    assert_eq!(recommendation.names(), vec![NATURE, TPAMI, JMLR]);
    assert_eq!(
        recommendation.results.iter().map(|r| r.rank).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(recommendation.fallback);
    assert_eq!(recommendation.notification(), "Found 0 matching journals");
}

#[test]
fn test_scenario_empty_title() {
    let result = SearchCriteria::new("", "An abstract", 3000, 5.0);
    assert_eq!(result.unwrap_err(), ValidationError::MissingSubmission);
}

#[test]
fn test_every_threshold_pair_matches_definition() {
    let catalog = Catalog::builtin();
    for budget in [0, 100, 2095, 3000, 5000, 5720] {
        for min_if in [0.0, 5.0, 6.1, 10.0, 16.6, 24.3, 30.0] {
            let criteria = SearchCriteria::new("t", "a", budget, min_if).unwrap();
            let recommendation = recommend::filter(&catalog, &criteria);

            let expected: Vec<&str> = catalog
                .records()
                .iter()
                .filter(|j| j.publishing_cost <= budget && j.impact_factor >= min_if)
                .map(|j| j.name.as_str())
                .collect();

            if expected.is_empty() {
                assert_eq!(recommendation.names(), vec![NATURE, TPAMI, JMLR]);
            } else {
                assert_eq!(recommendation.names(), expected);
            }
            assert_eq!(recommendation.matched_count, expected.len());
        }
    }
}

#[tokio::test]
async fn test_dashboard_end_to_end() {
    let dashboard = Dashboard::new(&instant_config(), Catalog::builtin())
        .with_plagiarism_checker(
            PlagiarismChecker::default()
                .with_strategy(Arc::new(FixedScore(11.0)))
                .with_latency(Duration::ZERO),
        )
        .with_ai_detector(
            AiContentDetector::default()
                .with_strategy(Arc::new(FixedScore(3.0)))
                .with_latency(Duration::ZERO),
        )
        .with_chatbot(
            ChatBot::default()
                .with_strategy(Arc::new(FixedReply(0)))
                .with_latency(Duration::ZERO),
        );

    dashboard.set_budget(5000);
    dashboard.set_min_impact_factor(10.0);
    let recommendation = dashboard.search("Title", "Abstract").await.unwrap();
    assert_eq!(recommendation.names(), vec![TPAMI]);

    let plagiarism = dashboard.check_plagiarism("Abstract").await.unwrap();
    assert_eq!(plagiarism.status, PlagiarismStatus::Warning);
    assert_eq!(plagiarism.headline(), "11.0% Similarity Detected");

    let ai = dashboard.detect_ai_content("Abstract").await.unwrap();
    assert_eq!(ai.headline(), "97.0% Human-Written");

    let reply = dashboard.send_chat("Any advice?").await.unwrap().unwrap();
    assert_eq!(reply.content, CANNED_REPLIES[0]);
    assert_eq!(dashboard.conversation().len(), 3);
}

#[tokio::test]
async fn test_dashboard_validation_never_searches() {
    let dashboard = Dashboard::new(&instant_config(), Catalog::builtin());
    let err = dashboard.search("Title", " \n\t").await.unwrap_err();

    assert!(matches!(
        err,
        DashboardError::Validation(ValidationError::MissingSubmission)
    ));
    assert!(dashboard.last_recommendation().is_none());
}

#[tokio::test(start_paused = true)]
async fn test_late_ai_result_dropped_after_close() {
    let mut config = instant_config();
    config.ai_detection.latency_ms = 3000;
    let dashboard = Arc::new(Dashboard::new(&config, Catalog::builtin()));

    let pending = {
        let dashboard = Arc::clone(&dashboard);
        tokio::spawn(async move { dashboard.detect_ai_content("text").await })
    };
    tokio::time::sleep(Duration::from_millis(2900)).await;
    assert!(dashboard.close_ai_detection());

    assert!(matches!(
        pending.await.unwrap(),
        Err(DashboardError::Cancelled(_))
    ));
    assert!(dashboard.ai_detection_report().is_none());

    // A fresh request after closing goes through
    let report = dashboard.detect_ai_content("text").await.unwrap();
    assert_eq!(dashboard.ai_detection_report(), Some(report));
}

#[tokio::test(start_paused = true)]
async fn test_busy_chat_rejects_second_message() {
    let mut config = instant_config();
    config.chat.latency_ms = 1500;
    let dashboard = Arc::new(Dashboard::new(&config, Catalog::builtin()));

    let first = {
        let dashboard = Arc::clone(&dashboard);
        tokio::spawn(async move { dashboard.send_chat("first").await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;

    let second = dashboard.send_chat("second").await;
    assert!(matches!(second, Err(DashboardError::Busy("chat"))));

    assert!(first.await.unwrap().unwrap().is_some());
    let transcript = dashboard.conversation();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].content, "first");
}

#[test]
fn test_session_guards_operations() {
    let dir = tempfile::tempdir().unwrap();
    let store = SessionStore::with_path(dir.path().join("session.json"));

    assert!(matches!(
        store.require_authenticated(),
        Err(SessionError::NotAuthenticated)
    ));

    store.login("researcher", true).unwrap();
    assert!(store.require_authenticated().is_ok());
    assert!(store.take_tutorial().unwrap());
    assert!(!store.take_tutorial().unwrap());

    store.logout().unwrap();
    assert!(store.require_authenticated().is_err());
}

#[tokio::test]
async fn test_tool_registry_round_trip() {
    let dashboard = Arc::new(Dashboard::new(&instant_config(), Catalog::builtin()));
    let registry = ToolRegistry::from_dashboard(dashboard);

    let result = registry
        .execute(
            "recommend_journals",
            json!({"title": "t", "abstract": "a", "budget": 100, "min_impact_factor": 10}),
        )
        .await
        .unwrap();
    assert_eq!(result["notification"], "Found 0 matching journals");
    assert_eq!(result["results"][2]["name"], JMLR);
    assert_eq!(result["results"][2]["rank"], 3);

    let err = registry
        .execute("recommend_journals", json!({"title": "t"}))
        .await
        .unwrap_err();
    assert_eq!(err, "Please enter both title and abstract");

    let journals = registry.execute("list_journals", json!({})).await.unwrap();
    assert_eq!(journals.as_array().unwrap().len(), 3);
}

#[test]
fn test_server_initialization() {
    let dashboard = Arc::new(Dashboard::new(&Config::default(), Catalog::builtin()));
    let server = McpServer::new(dashboard).unwrap();
    assert_eq!(
        server.tool_names(),
        &[
            "ask_assistant",
            "check_plagiarism",
            "detect_ai_content",
            "list_journals",
            "recommend_journals"
        ]
    );
}
