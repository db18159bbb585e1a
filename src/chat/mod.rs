//! Canned research assistant.
//!
//! The assistant greets the user, then answers every message with one of a
//! fixed set of replies after a short simulated "typing" delay.

use std::sync::Arc;
use std::time::Duration;

use crate::config::ChatConfig;
use crate::models::ChatMessage;

/// First message of every conversation
pub const GREETING: &str = "Hello! I'm your research journal assistant. Ask me anything about journals, submission guidelines, or academic publishing!";

/// Replies the assistant chooses from
pub const CANNED_REPLIES: [&str; 5] = [
    "Based on your paper's content, I recommend focusing on journals with high citation rates in your field. The journals shown have strong reputations.",
    "The average review time for these journals is 6-8 weeks. Consider submitting to multiple journals simultaneously if their policies allow it.",
    "Impact factor is important, but also consider the journal's scope, audience, and open access options. A good fit matters more than just numbers.",
    "For your research area, these journals have acceptance rates between 15-30%, which is typical for high-quality publications.",
    "Publishing costs vary, but many institutions offer funding support. Check with your university's library or research office.",
];

/// Picks which canned reply answers a message
pub trait ReplyStrategy: Send + Sync + std::fmt::Debug {
    /// Return an index in `0..count`
    fn pick(&self, message: &str, count: usize) -> usize;
}

/// Uniformly random reply
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomReply;

impl ReplyStrategy for RandomReply {
    fn pick(&self, _message: &str, count: usize) -> usize {
        fastrand::usize(..count)
    }
}

/// Always the same reply (wrapped into range)
#[derive(Debug, Clone, Copy)]
pub struct FixedReply(pub usize);

impl ReplyStrategy for FixedReply {
    fn pick(&self, _message: &str, count: usize) -> usize {
        self.0 % count
    }
}

/// The assistant: reply selection plus typing delay
#[derive(Debug, Clone)]
pub struct ChatBot {
    latency: Duration,
    strategy: Arc<dyn ReplyStrategy>,
}

impl ChatBot {
    /// Create an assistant from configuration with random replies
    pub fn new(config: &ChatConfig) -> Self {
        Self {
            latency: Duration::from_millis(config.latency_ms),
            strategy: Arc::new(RandomReply),
        }
    }

    /// Replace the reply strategy
    pub fn with_strategy(mut self, strategy: Arc<dyn ReplyStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Replace the simulated typing delay
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Choose a reply without waiting
    pub fn reply_now(&self, message: &str) -> ChatMessage {
        let index = self.strategy.pick(message, CANNED_REPLIES.len());
        ChatMessage::assistant(CANNED_REPLIES[index])
    }

    /// Wait for the typing delay, then reply
    pub async fn reply(&self, message: &str) -> ChatMessage {
        tokio::time::sleep(self.latency).await;
        self.reply_now(message)
    }
}

impl Default for ChatBot {
    fn default() -> Self {
        Self::new(&ChatConfig::default())
    }
}

/// Most messages a transcript keeps, greeting included
pub const MAX_TRANSCRIPT_LEN: usize = 100;

/// A conversation transcript, starting with the greeting
///
/// Once [`MAX_TRANSCRIPT_LEN`] is reached the oldest exchanges after the
/// greeting are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Start a conversation with the assistant greeting
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::assistant(GREETING)],
        }
    }

    /// Append a user message
    ///
    /// Whitespace-only input is ignored and `None` is returned; otherwise the
    /// stored message is returned.
    pub fn push_user(&mut self, input: &str) -> Option<ChatMessage> {
        if input.trim().is_empty() {
            return None;
        }
        let message = ChatMessage::user(input);
        self.push(message.clone());
        Some(message)
    }

    /// Append an assistant reply
    pub fn push_reply(&mut self, reply: ChatMessage) {
        self.push(reply);
    }

    fn push(&mut self, message: ChatMessage) {
        if self.messages.len() >= MAX_TRANSCRIPT_LEN {
            let excess = self.messages.len() + 1 - MAX_TRANSCRIPT_LEN;
            self.messages.drain(1..=excess);
        }
        self.messages.push(message);
    }

    /// All messages, oldest first
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Most recent message
    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Number of messages including the greeting
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Never true: the greeting is always present
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
