//! Single in-flight requests with late-result suppression.
//!
//! Every operation kind (search, plagiarism check, AI detection, chat) owns
//! one [`RequestSlot`]. A slot admits one pending request at a time and holds
//! the last committed result. Each request is keyed by a [`RequestToken`];
//! invalidating the slot (the user closed the dialog) retires the active
//! token, so a result that arrives afterwards is dropped instead of being
//! written into stale state.
//!
//! ```rust
//! use journal_finder::tasks::{RequestSlot, TaskError};
//!
//! let slot: RequestSlot<u32> = RequestSlot::new("search");
//! let token = slot.begin().unwrap();
//! assert!(matches!(slot.begin(), Err(TaskError::Busy(_))));
//!
//! assert!(slot.commit(token, 42));
//! assert_eq!(slot.result(), Some(42));
//! ```

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Identifies one request issued through a [`RequestSlot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestToken(u64);

impl RequestToken {
    /// Sequence number of the request within its slot
    pub fn id(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct SlotState<T> {
    active: Option<RequestToken>,
    result: Option<T>,
}

/// One-at-a-time request slot with a single result cell
#[derive(Debug)]
pub struct RequestSlot<T> {
    name: &'static str,
    next_id: AtomicU64,
    state: Mutex<SlotState<T>>,
}

impl<T> RequestSlot<T> {
    /// Create an idle, empty slot
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            next_id: AtomicU64::new(1),
            state: Mutex::new(SlotState {
                active: None,
                result: None,
            }),
        }
    }

    /// Name used in logs and errors
    pub fn name(&self) -> &'static str {
        self.name
    }

    fn lock(&self) -> MutexGuard<'_, SlotState<T>> {
        // The state is plain data; a panic mid-update cannot leave it torn
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start a request, failing while another one is pending
    pub fn begin(&self) -> Result<RequestToken, TaskError> {
        let mut state = self.lock();
        if state.active.is_some() {
            return Err(TaskError::Busy(self.name));
        }

        let token = RequestToken(self.next_id.fetch_add(1, Ordering::SeqCst));
        state.active = Some(token);
        tracing::debug!(slot = self.name, token = token.0, "Request started");
        Ok(token)
    }

    /// Store the result of a request
    ///
    /// Applied only when `token` is still the active request; returns whether
    /// the result was stored.
    pub fn commit(&self, token: RequestToken, value: T) -> bool {
        let mut state = self.lock();
        if state.active != Some(token) {
            tracing::warn!(
                slot = self.name,
                token = token.0,
                "Dropping result of a request that is no longer active"
            );
            return false;
        }

        state.active = None;
        state.result = Some(value);
        tracing::debug!(slot = self.name, token = token.0, "Request committed");
        true
    }

    /// Retire the active request, if any
    ///
    /// The slot becomes idle immediately; the retired request's result will
    /// be dropped when it arrives.
    pub fn invalidate(&self) -> Option<RequestToken> {
        let retired = self.lock().active.take();
        if let Some(token) = retired {
            tracing::debug!(slot = self.name, token = token.0, "Request invalidated");
        }
        retired
    }

    /// Release `token` without a result if it is still active
    fn release(&self, token: RequestToken) {
        let mut state = self.lock();
        if state.active == Some(token) {
            state.active = None;
        }
    }

    /// Whether a request is pending
    pub fn is_busy(&self) -> bool {
        self.lock().active.is_some()
    }

    /// The active request, if any
    pub fn active(&self) -> Option<RequestToken> {
        self.lock().active
    }

    /// Discard the stored result
    pub fn clear(&self) -> Option<T> {
        self.lock().result.take()
    }

    /// Whether a result is stored
    pub fn has_result(&self) -> bool {
        self.lock().result.is_some()
    }
}

impl<T: Clone> RequestSlot<T> {
    /// A copy of the stored result
    pub fn result(&self) -> Option<T> {
        self.lock().result.clone()
    }

    /// Run `work` as this slot's request
    ///
    /// Returns the value if it was committed, [`TaskError::Busy`] if another
    /// request was pending, or [`TaskError::Cancelled`] if the slot was
    /// invalidated while `work` ran. Dropping the returned future releases
    /// the slot.
    pub async fn run<F>(&self, work: F) -> Result<T, TaskError>
    where
        F: Future<Output = T>,
    {
        let token = self.begin()?;
        let guard = ReleaseOnDrop { slot: self, token };

        let value = work.await;
        std::mem::forget(guard);

        if self.commit(token, value.clone()) {
            Ok(value)
        } else {
            Err(TaskError::Cancelled(self.name))
        }
    }
}

struct ReleaseOnDrop<'a, T> {
    slot: &'a RequestSlot<T>,
    token: RequestToken,
}

impl<T> Drop for ReleaseOnDrop<'_, T> {
    fn drop(&mut self) {
        self.slot.release(self.token);
    }
}

/// Request slot errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// Another request of the same kind is still pending
    #[error("A {0} request is already in progress")]
    Busy(&'static str),

    /// The request was invalidated before it finished
    #[error("The {0} request was cancelled")]
    Cancelled(&'static str),
}
