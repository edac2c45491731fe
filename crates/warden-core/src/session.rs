//! Session-scoped state.
//!
//! A [`Session`] owns everything that lives exactly as long as one host
//! session: the set of topics already injected and the ambient status the
//! status handler keeps current. Nothing here is persisted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

use crate::hook_event::ModelInfo;

/// Unique identifier for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Generate a fresh session ID.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Records which topics have been delivered in the current session.
///
/// A topic id is delivered at most once between two calls to [`reset`].
///
/// [`reset`]: InjectionTracker::reset
#[derive(Debug, Clone, Default)]
pub struct InjectionTracker {
    delivered: HashSet<String>,
}

impl InjectionTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether a topic was already delivered.
    #[must_use]
    pub fn has(&self, topic: &str) -> bool {
        self.delivered.contains(topic)
    }

    /// Record a topic as delivered.
    ///
    /// Returns `false` if it had already been recorded.
    pub fn mark_delivered(&mut self, topic: impl Into<String>) -> bool {
        self.delivered.insert(topic.into())
    }

    /// Forget every delivered topic.
    pub fn reset(&mut self) {
        self.delivered.clear();
    }

    /// The delivered topic ids.
    #[must_use]
    pub fn delivered(&self) -> &HashSet<String> {
        &self.delivered
    }

    /// Number of delivered topics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.delivered.len()
    }

    /// Whether nothing has been delivered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.delivered.is_empty()
    }
}

/// Ambient status for peripheral UI (branch, active model).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionStatus {
    /// Current source-control branch, empty when unknown.
    pub branch: String,
    /// Model active in the latest turn.
    pub model: Option<ModelInfo>,
}

/// One host session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session identifier.
    pub id: SessionId,
    /// When the session object was created.
    pub created_at: DateTime<Utc>,
    /// Topics already injected in this session.
    pub injections: InjectionTracker,
    /// Ambient status.
    pub status: SessionStatus,
}

impl Session {
    /// Create a new, empty session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            created_at: Utc::now(),
            injections: InjectionTracker::new(),
            status: SessionStatus::default(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_at_most_once() {
        let mut tracker = InjectionTracker::new();
        assert!(!tracker.has("python"));
        assert!(tracker.mark_delivered("python"));
        assert!(!tracker.mark_delivered("python"));
        assert!(tracker.has("python"));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_tracker_reset() {
        let mut tracker = InjectionTracker::new();
        tracker.mark_delivered("python");
        tracker.mark_delivered("shell");
        tracker.reset();
        assert!(tracker.is_empty());
        assert!(!tracker.has("python"));
        assert!(tracker.mark_delivered("python"));
    }

    #[test]
    fn test_sessions_are_independent() {
        let mut a = Session::new();
        let b = Session::new();
        a.injections.mark_delivered("search");
        assert!(!b.injections.has("search"));
        assert_ne!(a.id, b.id);
    }
}
