//! Warden Core - Shared types for the Warden interception layer.
//!
//! This crate holds the types every other Warden crate agrees on:
//!
//! - [`HookEvent`]: lifecycle and tool-call events emitted by the host
//! - [`ToolInvocation`]: a single proposed tool action
//! - [`Session`] and [`InjectionTracker`]: session-scoped mutable state
//! - [`Host`] and [`InteractiveSurface`]: the capabilities the host exposes
//! - [`WardenHome`]: the global `~/.warden/` directory
//!
//! # Example
//!
//! ```
//! use warden_core::{HookEvent, Session, ToolInvocation};
//!
//! let mut session = Session::new();
//! assert!(session.injections.mark_delivered("python"));
//! assert!(session.injections.has("python"));
//!
//! let event = HookEvent::ToolCall(
//!     ToolInvocation::new("read").with_arg("path", "deploy.sh"),
//! );
//! assert_eq!(event.kind().to_string(), "tool_call");
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod dirs;
pub mod error;
pub mod hook_event;
pub mod host;
pub mod invocation;
pub mod session;

pub use dirs::WardenHome;
pub use error::{HostError, HostResult};
pub use hook_event::{HookEvent, HookEventKind, ModelInfo};
pub use host::{
    DeliverAs, ExecOutput, Host, InteractiveSurface, NotifyLevel, SessionMessage, run_process,
};
pub use invocation::ToolInvocation;
pub use session::{InjectionTracker, Session, SessionId, SessionStatus};
