//! Tool registry for MCP tools.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use crate::dashboard::Dashboard;

use super::handlers::{
    AskAssistantHandler, CheckPlagiarismHandler, DetectAiContentHandler, ListJournalsHandler,
    RecommendJournalsHandler,
};

/// An MCP tool that can be called by the client
#[derive(Clone)]
pub struct Tool {
    /// Tool name (e.g., "recommend_journals")
    pub name: String,

    /// Human-readable description
    pub description: String,

    /// JSON Schema for input parameters
    pub input_schema: serde_json::Value,

    /// Handler function to execute the tool
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("input_schema", &self.input_schema)
            .finish()
    }
}

/// Handler for executing a tool
#[async_trait::async_trait]
pub trait ToolHandler: Send + Sync + std::fmt::Debug {
    /// Execute the tool with the given arguments
    async fn execute(&self, args: Value) -> Result<Value, String>;
}

/// Registry for all MCP tools
#[derive(Debug, Clone, Default)]
pub struct ToolRegistry {
    tools: BTreeMap<String, Tool>,
}

impl ToolRegistry {
    /// Create a registry exposing the operations of `dashboard`
    pub fn from_dashboard(dashboard: Arc<Dashboard>) -> Self {
        let mut registry = Self::default();
        registry.register_dashboard_tools(&dashboard);
        registry
    }

    fn register_dashboard_tools(&mut self, dashboard: &Arc<Dashboard>) {
        let filters = dashboard.filters();

        self.register(Tool {
            name: "recommend_journals".to_string(),
            description: format!(
                "Recommend journals for a paper from a catalog of {} journals, filtered by publishing budget and minimum impact factor",
                dashboard.catalog().len()
            ),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "title": {
                        "type": "string",
                        "description": "Paper title"
                    },
                    "abstract": {
                        "type": "string",
                        "description": "Paper abstract"
                    },
                    "budget": {
                        "type": "integer",
                        "description": "Maximum publishing cost (0-5000)",
                        "default": filters.budget
                    },
                    "min_impact_factor": {
                        "type": "number",
                        "description": "Minimum impact factor (0-10)",
                        "default": filters.min_impact_factor
                    }
                },
                "required": ["title", "abstract"]
            }),
            handler: Arc::new(RecommendJournalsHandler {
                dashboard: Arc::clone(dashboard),
            }),
        });

        self.register(Tool {
            name: "check_plagiarism".to_string(),
            description: "Run a simulated plagiarism check and report similarity with matched sources".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "content": {
                        "type": "string",
                        "description": "Text to check"
                    }
                },
                "required": ["content"]
            }),
            handler: Arc::new(CheckPlagiarismHandler {
                dashboard: Arc::clone(dashboard),
            }),
        });

        self.register(Tool {
            name: "detect_ai_content".to_string(),
            description: "Run a simulated AI-generated content check with a per-section breakdown".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "content": {
                        "type": "string",
                        "description": "Text to check"
                    }
                },
                "required": ["content"]
            }),
            handler: Arc::new(DetectAiContentHandler {
                dashboard: Arc::clone(dashboard),
            }),
        });

        self.register(Tool {
            name: "ask_assistant".to_string(),
            description: "Ask the research journal assistant about journals, submission guidelines or academic publishing".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "message": {
                        "type": "string",
                        "description": "Question for the assistant"
                    }
                },
                "required": ["message"]
            }),
            handler: Arc::new(AskAssistantHandler {
                dashboard: Arc::clone(dashboard),
            }),
        });

        self.register(Tool {
            name: "list_journals".to_string(),
            description: "List every journal in the catalog".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
            handler: Arc::new(ListJournalsHandler {
                dashboard: Arc::clone(dashboard),
            }),
        });
    }

    /// Register a tool
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.name.clone(), tool);
    }

    /// Get all tools, ordered by name
    pub fn all(&self) -> Vec<&Tool> {
        self.tools.values().collect()
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, String> {
        let tool = self
            .get(name)
            .ok_or_else(|| format!("Tool '{}' not found", name))?;

        tracing::debug!(tool = name, "Executing tool");
        tool.handler.execute(args).await
    }
}
