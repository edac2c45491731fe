//! Hook event types shared across crates.
//!
//! `HookEvent` lives in `warden-core` so that the dispatcher in
//! `warden-hooks` and the policy crates can reference it without a
//! circular dependency.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::invocation::ToolInvocation;

/// The kind of an event, used to index handler lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HookEventKind {
    /// A session has started.
    SessionStart,
    /// The agent is about to start reasoning over a prompt.
    BeforeAgentStart,
    /// The agent is about to invoke a tool.
    ToolCall,
    /// A turn has started.
    TurnStart,
    /// A turn has ended.
    TurnEnd,
}

impl fmt::Display for HookEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SessionStart => write!(f, "session_start"),
            Self::BeforeAgentStart => write!(f, "before_agent_start"),
            Self::ToolCall => write!(f, "tool_call"),
            Self::TurnStart => write!(f, "turn_start"),
            Self::TurnEnd => write!(f, "turn_end"),
        }
    }
}

/// The model active for a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier (e.g. `"claude-sonnet"`).
    pub id: String,
    /// Provider name, if the host reports one.
    #[serde(default)]
    pub provider: Option<String>,
    /// Context window in tokens. `0` when unknown.
    #[serde(default)]
    pub context_window: u64,
}

impl ModelInfo {
    /// Create model info with an unknown context window.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            provider: None,
            context_window: 0,
        }
    }

    /// Set the context window size.
    #[must_use]
    pub fn with_context_window(mut self, tokens: u64) -> Self {
        self.context_window = tokens;
        self
    }
}

/// An event emitted by the host runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum HookEvent {
    /// A new session begins.
    SessionStart,
    /// The agent is about to reason over `prompt`.
    BeforeAgentStart {
        /// The user's prompt text for this turn.
        prompt: String,
    },
    /// The agent proposes a tool invocation.
    ToolCall(ToolInvocation),
    /// A turn has started.
    TurnStart {
        /// The model handling this turn.
        #[serde(default)]
        model: Option<ModelInfo>,
    },
    /// A turn has ended.
    TurnEnd,
}

impl HookEvent {
    /// The kind of this event.
    #[must_use]
    pub fn kind(&self) -> HookEventKind {
        match self {
            Self::SessionStart => HookEventKind::SessionStart,
            Self::BeforeAgentStart { .. } => HookEventKind::BeforeAgentStart,
            Self::ToolCall(_) => HookEventKind::ToolCall,
            Self::TurnStart { .. } => HookEventKind::TurnStart,
            Self::TurnEnd => HookEventKind::TurnEnd,
        }
    }

    /// The tool invocation carried by a `ToolCall` event.
    #[must_use]
    pub fn invocation(&self) -> Option<&ToolInvocation> {
        match self {
            Self::ToolCall(invocation) => Some(invocation),
            _ => None,
        }
    }
}
