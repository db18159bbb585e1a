//! # Journal Finder
//!
//! Journal recommendations for research papers, with simulated plagiarism
//! and AI-content checks and a research assistant, usable as a library, a
//! CLI and a Model Context Protocol (MCP) server.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (JournalRecord, SearchCriteria, reports)
//! - [`catalog`]: The fixed journal catalog
//! - [`recommend`]: The budget / impact-factor recommendation filter
//! - [`detect`]: Simulated plagiarism and AI-content checks
//! - [`chat`]: The canned research assistant
//! - [`tasks`]: Single in-flight requests with late-result suppression
//! - [`dashboard`]: Filter controls and operations tied together
//! - [`session`]: Persisted sign-in and tutorial flags
//! - [`mcp`]: MCP protocol implementation and server
//! - [`ui`]: Terminal rendering
//! - [`utils`]: Validation and text formatting
//! - [`config`]: Configuration management
//!
//! ## Example
//!
//! ```rust
//! use journal_finder::{recommend, Catalog, SearchCriteria};
//!
//! let catalog = Catalog::builtin();
//! let criteria = SearchCriteria::new("Sparse attention", "We show...", 3000, 5.0).unwrap();
//! let recommendation = recommend::filter(&catalog, &criteria);
//!
//! assert_eq!(recommendation.notification(), "Found 2 matching journals");
//! ```

pub mod catalog;
pub mod chat;
pub mod config;
pub mod dashboard;
pub mod detect;
pub mod mcp;
pub mod models;
pub mod recommend;
pub mod session;
pub mod tasks;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use catalog::Catalog;
pub use chat::ChatBot;
pub use dashboard::{Dashboard, DashboardError};
pub use models::{JournalRecord, Recommendation, SearchCriteria};
pub use session::{SessionState, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
