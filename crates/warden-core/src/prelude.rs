//! Prelude module - commonly used types for convenient import.
//!
//! Use `use warden_core::prelude::*;` to import all essential types.

// Events
pub use crate::{HookEvent, HookEventKind, ModelInfo, ToolInvocation};

// Session state
pub use crate::{InjectionTracker, Session, SessionId, SessionStatus};

// Host capabilities
pub use crate::{DeliverAs, ExecOutput, Host, InteractiveSurface, NotifyLevel, SessionMessage};

// Errors
pub use crate::{HostError, HostResult};

// Directories
pub use crate::WardenHome;
