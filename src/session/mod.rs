//! Local session flags.
//!
//! The session is a small JSON file in the user's config directory recording
//! whether someone is signed in and whether the onboarding tutorial is still
//! owed to them. Operations that need a signed-in user go through
//! [`SessionStore::require_authenticated`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One page of the onboarding tutorial
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TutorialStep {
    pub title: &'static str,
    pub description: &'static str,
}

/// Tutorial shown once after an account is created
pub const TUTORIAL_STEPS: [TutorialStep; 5] = [
    TutorialStep {
        title: "Welcome to Research Journal Finder",
        description: "Your intelligent assistant for finding the perfect academic journals for your research papers.",
    },
    TutorialStep {
        title: "Search for Journals",
        description: "Enter your paper's title and abstract, then use filters like budget and impact factor to find the top 3 matching journals.",
    },
    TutorialStep {
        title: "AI Chatbot Assistant",
        description: "Ask our AI chatbot questions about recommended journals, submission guidelines, or publishing insights.",
    },
    TutorialStep {
        title: "Plagiarism Check",
        description: "Ensure your work is original with our built-in plagiarism detection tool before submission.",
    },
    TutorialStep {
        title: "AI Content Detection",
        description: "Verify your content authenticity with AI-generated content detection to maintain academic integrity.",
    },
];

/// Persisted session flags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Someone is signed in
    pub authenticated: bool,

    /// The tutorial has not been shown since the account was created
    #[serde(default)]
    pub tutorial_pending: bool,

    /// Signed-in user name
    #[serde(default)]
    pub user: Option<String>,

    /// When the current session started
    #[serde(default)]
    pub signed_in_at: Option<DateTime<Utc>>,
}

/// Reads and writes the session file
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Session file in the platform config directory
    pub fn new() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("journal-finder");
        Self {
            path: config_dir.join("session.json"),
        }
    }

    /// Session file at an explicit path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Session file from configuration, falling back to the default location
    pub fn from_config(config: &crate::config::SessionConfig) -> Self {
        match &config.path {
            Some(path) => Self::with_path(path.clone()),
            None => Self::new(),
        }
    }

    /// Path of the session file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the session; a missing file is a signed-out session
    pub fn load(&self) -> Result<SessionState, SessionError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(SessionState::default())
            }
            Err(e) => return Err(SessionError::Io(e.to_string())),
        };

        serde_json::from_str(&content).map_err(|e| SessionError::Parse(e.to_string()))
    }

    /// Write the session
    pub fn save(&self, state: &SessionState) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SessionError::Io(e.to_string()))?;
        }

        let json =
            serde_json::to_string_pretty(state).map_err(|e| SessionError::Parse(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| SessionError::Io(e.to_string()))
    }

    /// Sign `user` in
    ///
    /// A new account also schedules the tutorial.
    pub fn login(&self, user: &str, new_account: bool) -> Result<SessionState, SessionError> {
        let user = user.trim();
        if user.is_empty() {
            return Err(SessionError::MissingUser);
        }

        let state = SessionState {
            authenticated: true,
            tutorial_pending: new_account,
            user: Some(user.to_string()),
            signed_in_at: Some(Utc::now()),
        };
        self.save(&state)?;

        tracing::info!(user, new_account, "Signed in");
        Ok(state)
    }

    /// Return whether the tutorial is pending, clearing the flag
    ///
    /// True at most once per account creation.
    pub fn take_tutorial(&self) -> Result<bool, SessionError> {
        let mut state = self.load()?;
        if !state.tutorial_pending {
            return Ok(false);
        }

        state.tutorial_pending = false;
        self.save(&state)?;
        tracing::debug!("Tutorial flag consumed");
        Ok(true)
    }

    /// Sign out, removing the session file
    ///
    /// Returns whether a session existed.
    pub fn logout(&self) -> Result<bool, SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!("Signed out");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(SessionError::Io(e.to_string())),
        }
    }

    /// The current session, or [`SessionError::NotAuthenticated`]
    pub fn require_authenticated(&self) -> Result<SessionState, SessionError> {
        let state = self.load()?;
        if state.authenticated {
            Ok(state)
        } else {
            Err(SessionError::NotAuthenticated)
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("Invalid session file: {0}")]
    Parse(String),

    #[error("Please enter a user name")]
    MissingUser,

    #[error("Not signed in. Run `journal-finder login <user>` first")]
    NotAuthenticated,
}
