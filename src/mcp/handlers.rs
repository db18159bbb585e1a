//! Tool handlers backed by a shared dashboard.

use std::sync::Arc;

use serde_json::Value;

use super::tools::ToolHandler;
use crate::dashboard::Dashboard;
use crate::models::SearchCriteria;
use crate::utils::{clamp_budget, clamp_impact_factor};

/// Fetch a required string argument
fn required_str<'a>(args: &'a Value, key: &str) -> Result<&'a str, String> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| format!("Missing '{}' parameter", key))
}

/// Fetch an optional budget, accepting whole-number floats
fn optional_budget(args: &Value) -> Result<Option<u32>, String> {
    let value = match args.get("budget") {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    if let Some(budget) = value.as_u64() {
        return Ok(Some(u32::try_from(budget).unwrap_or(u32::MAX)));
    }
    match value.as_f64() {
        // `as` saturates at u32::MAX
        Some(budget) if budget >= 0.0 && budget.fract() == 0.0 => Ok(Some(budget as u32)),
        _ => Err("'budget' must be a non-negative integer".to_string()),
    }
}

/// Fetch an optional finite number
fn optional_number(args: &Value, key: &str) -> Result<Option<f64>, String> {
    match args.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| format!("'{}' must be a number", key)),
    }
}

/// Handler for journal recommendations
#[derive(Debug)]
pub struct RecommendJournalsHandler {
    pub dashboard: Arc<Dashboard>,
}

#[async_trait::async_trait]
impl ToolHandler for RecommendJournalsHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let title = args.get("title").and_then(|v| v.as_str()).unwrap_or("");
        let abstract_text = args.get("abstract").and_then(|v| v.as_str()).unwrap_or("");

        let filters = self.dashboard.filters();
        let budget = optional_budget(&args)?
            .map(clamp_budget)
            .unwrap_or(filters.budget);
        let min_impact_factor = optional_number(&args, "min_impact_factor")?
            .map(clamp_impact_factor)
            .unwrap_or(filters.min_impact_factor);

        let criteria = SearchCriteria::new(title, abstract_text, budget, min_impact_factor)
            .map_err(|e| e.to_string())?;

        let recommendation = self
            .dashboard
            .search_with(criteria)
            .await
            .map_err(|e| e.to_string())?;

        Ok(serde_json::json!({
            "notification": recommendation.notification(),
            "matched_count": recommendation.matched_count,
            "fallback": recommendation.fallback,
            "results": recommendation.results,
        }))
    }
}

/// Handler for the plagiarism check
#[derive(Debug)]
pub struct CheckPlagiarismHandler {
    pub dashboard: Arc<Dashboard>,
}

#[async_trait::async_trait]
impl ToolHandler for CheckPlagiarismHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let content = required_str(&args, "content")?;

        let report = self
            .dashboard
            .check_plagiarism(content)
            .await
            .map_err(|e| e.to_string())?;

        Ok(serde_json::json!({
            "headline": report.headline(),
            "summary": report.status.label(),
            "report": report,
        }))
    }
}

/// Handler for the AI content check
#[derive(Debug)]
pub struct DetectAiContentHandler {
    pub dashboard: Arc<Dashboard>,
}

#[async_trait::async_trait]
impl ToolHandler for DetectAiContentHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let content = required_str(&args, "content")?;

        let report = self
            .dashboard
            .detect_ai_content(content)
            .await
            .map_err(|e| e.to_string())?;

        Ok(serde_json::json!({
            "headline": report.headline(),
            "summary": report.status.label(),
            "report": report,
        }))
    }
}

/// Handler for assistant questions
#[derive(Debug)]
pub struct AskAssistantHandler {
    pub dashboard: Arc<Dashboard>,
}

#[async_trait::async_trait]
impl ToolHandler for AskAssistantHandler {
    async fn execute(&self, args: Value) -> Result<Value, String> {
        let message = required_str(&args, "message")?;

        let reply = self
            .dashboard
            .send_chat(message)
            .await
            .map_err(|e| e.to_string())?
            .ok_or("Message is empty")?;

        serde_json::to_value(reply).map_err(|e| e.to_string())
    }
}

/// Handler listing the catalog
#[derive(Debug)]
pub struct ListJournalsHandler {
    pub dashboard: Arc<Dashboard>,
}

#[async_trait::async_trait]
impl ToolHandler for ListJournalsHandler {
    async fn execute(&self, _args: Value) -> Result<Value, String> {
        let journals = self
            .dashboard
            .catalog()
            .records()
            .iter()
            .map(|journal| {
                let mut value = serde_json::to_value(journal).map_err(|e| e.to_string())?;
                if let Value::Object(map) = &mut value {
                    map.insert("high_impact".to_string(), journal.is_high_impact().into());
                }
                Ok(value)
            })
            .collect::<Result<Vec<_>, String>>()?;

        Ok(Value::Array(journals))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::chat::{CANNED_REPLIES, MAX_TRANSCRIPT_LEN};
    use crate::config::Config;
    use serde_json::json;

    fn dashboard() -> Arc<Dashboard> {
        let mut config = Config::default();
        config.search.latency_ms = 0;
        config.plagiarism.latency_ms = 0;
        config.ai_detection.latency_ms = 0;
        config.chat.latency_ms = 0;
        Arc::new(Dashboard::new(&config, Catalog::builtin()))
    }

    #[tokio::test]
    async fn test_recommend_with_defaults() {
        let handler = RecommendJournalsHandler {
            dashboard: dashboard(),
        };
        let result = handler
            .execute(json!({"title": "Graph nets", "abstract": "We propose..."}))
            .await
            .unwrap();

        assert_eq!(result["notification"], "Found 2 matching journals");
        assert_eq!(result["fallback"], false);
        assert_eq!(result["results"][0]["rank"], 1);
        assert_eq!(
            result["results"][0]["name"],
            "IEEE Transactions on Pattern Analysis and Machine Intelligence"
        );
        assert_eq!(result["results"][1]["rank"], 2);
    }

    #[tokio::test]
    async fn test_recommend_fallback() {
        let handler = RecommendJournalsHandler {
            dashboard: dashboard(),
        };
        let result = handler
            .execute(json!({
                "title": "t",
                "abstract": "a",
                "budget": 100,
                "min_impact_factor": 9.5
            }))
            .await
            .unwrap();

        assert_eq!(result["notification"], "Found 0 matching journals");
        assert_eq!(result["fallback"], true);
        assert_eq!(result["results"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_recommend_accepts_whole_float_budget() {
        let handler = RecommendJournalsHandler {
            dashboard: dashboard(),
        };
        for budget in [json!(100), json!(100.0)] {
            let result = handler
                .execute(json!({
                    "title": "t",
                    "abstract": "a",
                    "budget": budget,
                    "min_impact_factor": 0
                }))
                .await
                .unwrap();

            assert_eq!(result["notification"], "Found 1 matching journals");
            assert_eq!(
                result["results"][0]["name"],
                "Journal of Machine Learning Research"
            );
        }
    }

    #[tokio::test]
    async fn test_recommend_rejects_bad_numbers() {
        let handler = RecommendJournalsHandler {
            dashboard: dashboard(),
        };
        for budget in [json!(-5), json!(100.5), json!("100")] {
            let err = handler
                .execute(json!({"title": "t", "abstract": "a", "budget": budget}))
                .await
                .unwrap_err();
            assert_eq!(err, "'budget' must be a non-negative integer");
        }

        let err = handler
            .execute(json!({"title": "t", "abstract": "a", "min_impact_factor": "high"}))
            .await
            .unwrap_err();
        assert_eq!(err, "'min_impact_factor' must be a number");
    }

    #[tokio::test]
    async fn test_recommend_validation_message() {
        let handler = RecommendJournalsHandler {
            dashboard: dashboard(),
        };
        let err = handler
            .execute(json!({"title": "", "abstract": "text"}))
            .await
            .unwrap_err();
        assert_eq!(err, "Please enter both title and abstract");
    }

    #[tokio::test]
    async fn test_check_plagiarism_requires_content() {
        let handler = CheckPlagiarismHandler {
            dashboard: dashboard(),
        };
        let err = handler.execute(json!({})).await.unwrap_err();
        assert_eq!(err, "Missing 'content' parameter");

        let result = handler.execute(json!({"content": "text"})).await.unwrap();
        assert!(result["headline"]
            .as_str()
            .unwrap()
            .ends_with("% Similarity Detected"));
        assert_eq!(result["report"]["matches"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_detect_ai_content() {
        let handler = DetectAiContentHandler {
            dashboard: dashboard(),
        };
        let result = handler.execute(json!({"content": "text"})).await.unwrap();
        assert_eq!(result["report"]["sections"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_ask_assistant() {
        let handler = AskAssistantHandler {
            dashboard: dashboard(),
        };
        let reply = handler
            .execute(json!({"message": "Which journal is cheapest?"}))
            .await
            .unwrap();

        assert_eq!(reply["role"], "assistant");
        assert!(CANNED_REPLIES.contains(&reply["content"].as_str().unwrap()));

        let err = handler.execute(json!({"message": "  "})).await.unwrap_err();
        assert_eq!(err, "Message is empty");
    }

    #[tokio::test]
    async fn test_ask_assistant_transcript_stays_bounded() {
        let dashboard = dashboard();
        let handler = AskAssistantHandler {
            dashboard: Arc::clone(&dashboard),
        };
        for _ in 0..MAX_TRANSCRIPT_LEN {
            handler.execute(json!({"message": "Any advice?"})).await.unwrap();
        }

        assert_eq!(dashboard.conversation().len(), MAX_TRANSCRIPT_LEN);
    }

    #[tokio::test]
    async fn test_list_journals() {
        let handler = ListJournalsHandler {
            dashboard: dashboard(),
        };
        let result = handler.execute(Value::Null).await.unwrap();
        let journals = result.as_array().unwrap();

        assert_eq!(journals.len(), 3);
        assert_eq!(journals[0]["name"], "Nature Communications");
        assert_eq!(journals[2]["high_impact"], true);
        assert_eq!(journals[2]["publishing_cost"], 0);
    }
}
