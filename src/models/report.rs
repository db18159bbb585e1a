//! Report models for the content checks and the assistant conversation.

use serde::{Deserialize, Serialize};

/// Round a percentage to one decimal place
pub fn round_percent(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Verdict of a plagiarism check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlagiarismStatus {
    Pass,
    Warning,
}

impl PlagiarismStatus {
    /// Summary line shown under the score
    pub fn label(&self) -> &'static str {
        match self {
            PlagiarismStatus::Pass => "Content appears original",
            PlagiarismStatus::Warning => "Minor similarities found",
        }
    }
}

/// Similarity attributed to one external source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMatch {
    /// Source name, e.g. "SpringerLink"
    pub source: String,

    /// Similarity percentage, one decimal
    pub similarity: f64,
}

/// Result of a plagiarism check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlagiarismReport {
    /// Overall similarity percentage, one decimal
    pub similarity: f64,

    /// Verdict
    pub status: PlagiarismStatus,

    /// Per-source breakdown
    pub matches: Vec<SourceMatch>,
}

impl PlagiarismReport {
    /// Headline, e.g. "4.2% Similarity Detected"
    pub fn headline(&self) -> String {
        format!("{:.1}% Similarity Detected", self.similarity)
    }
}

/// Verdict of an AI-content check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiContentStatus {
    Human,
    Mixed,
}

impl AiContentStatus {
    /// Summary line shown under the score
    pub fn label(&self) -> &'static str {
        match self {
            AiContentStatus::Human => "Content appears authentic",
            AiContentStatus::Mixed => "Some AI patterns detected",
        }
    }
}

/// AI score for one paper section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionScore {
    /// Section name, e.g. "Methodology"
    pub name: String,

    /// AI percentage, one decimal
    pub ai_score: f64,

    /// Section verdict
    pub status: AiContentStatus,
}

/// Result of an AI-content check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiDetectionReport {
    /// Share judged AI-generated, one decimal
    pub ai_probability: f64,

    /// Share judged human-written, one decimal
    pub human_probability: f64,

    /// Verdict
    pub status: AiContentStatus,

    /// Per-section breakdown
    pub sections: Vec<SectionScore>,
}

impl AiDetectionReport {
    /// Headline, e.g. "91.3% Human-Written"
    pub fn headline(&self) -> String {
        format!("{:.1}% Human-Written", self.human_probability)
    }
}

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One message of the assistant conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    /// Message typed by the user
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    /// Message produced by the assistant
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}
