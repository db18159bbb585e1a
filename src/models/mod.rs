//! Core data models for journals, searches, and content checks.

mod journal;
mod report;
mod search;

pub use journal::{JournalRecord, JournalRecordBuilder, HIGH_IMPACT_THRESHOLD};
pub use report::{
    round_percent, AiContentStatus, AiDetectionReport, ChatMessage, ChatRole, PlagiarismReport,
    PlagiarismStatus, SectionScore, SourceMatch,
};
pub use search::{
    RankedResult, Recommendation, SearchCriteria, DEFAULT_BUDGET, DEFAULT_MIN_IMPACT_FACTOR,
};
