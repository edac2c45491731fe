//! Hook results and the context handlers run in.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use warden_core::{Host, HookEventKind, Session};

/// Result of running a handler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum HookResult {
    /// Continue with no changes.
    #[default]
    Continue,
    /// Append text to the agent's effective instructions for this turn.
    AppendInstructions {
        /// Text to append.
        text: String,
    },
    /// Block the action that triggered the event.
    Block {
        /// Human-readable reason.
        reason: String,
    },
}

impl HookResult {
    /// Create a continue result.
    #[must_use]
    pub fn continue_() -> Self {
        Self::Continue
    }

    /// Create an instruction-append result.
    #[must_use]
    pub fn append(text: impl Into<String>) -> Self {
        Self::AppendInstructions { text: text.into() }
    }

    /// Create a block result.
    #[must_use]
    pub fn block(reason: impl Into<String>) -> Self {
        Self::Block {
            reason: reason.into(),
        }
    }

    /// Check if this result blocks the action.
    #[must_use]
    pub fn is_blocking(&self) -> bool {
        matches!(self, Self::Block { .. })
    }

    /// The text to append, if any.
    #[must_use]
    pub fn appended_text(&self) -> Option<&str> {
        match self {
            Self::AppendInstructions { text } => Some(text),
            _ => None,
        }
    }
}

/// Context provided to handlers for one event.
pub struct HookContext<'a> {
    /// Unique identifier for this dispatch.
    pub invocation_id: Uuid,
    /// The kind of event being dispatched.
    pub event: HookEventKind,
    /// When dispatch started.
    pub timestamp: DateTime<Utc>,
    /// The session the event belongs to.
    pub session: &'a mut Session,
    /// Host capabilities.
    pub host: &'a dyn Host,
}

impl<'a> HookContext<'a> {
    /// Create a context for dispatching `event` within `session`.
    #[must_use]
    pub fn new(event: HookEventKind, session: &'a mut Session, host: &'a dyn Host) -> Self {
        Self {
            invocation_id: Uuid::new_v4(),
            event,
            timestamp: Utc::now(),
            session,
            host,
        }
    }
}

impl std::fmt::Debug for HookContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookContext")
            .field("invocation_id", &self.invocation_id)
            .field("event", &self.event)
            .field("session", &self.session.id)
            .finish_non_exhaustive()
    }
}

/// Record of one handler run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookExecution {
    /// Name of the handler.
    pub handler: String,
    /// Dispatch the run belonged to.
    pub invocation_id: Uuid,
    /// When the handler started.
    pub started_at: DateTime<Utc>,
    /// Duration in milliseconds.
    pub duration_ms: u64,
    /// What the handler returned.
    pub result: HookResult,
}
