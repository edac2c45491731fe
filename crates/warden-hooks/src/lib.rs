//! Warden Hooks - Ordered handler dispatch for host events.
//!
//! The host emits lifecycle and tool-call events; this crate runs the
//! handlers registered for each event kind in a fixed order and combines
//! their results.
//!
//! # Hook Events
//!
//! - `session_start`
//! - `before_agent_start` (prompt text)
//! - `tool_call` (tool name and arguments)
//! - `turn_start` / `turn_end`
//!
//! # Composition
//!
//! Handlers run sequentially, lower priority first, then in registration
//! order. The first [`HookResult::Block`] stops the chain and wins.
//! Instruction appends from the handlers that ran are concatenated.
//!
//! # Example
//!
//! ```rust,ignore
//! use warden_hooks::{HookManager, HookResult};
//!
//! let mut manager = HookManager::new();
//! manager.register(std::sync::Arc::new(MyHandler));
//!
//! let result = manager.trigger_simple(&event, &mut session, &host).await;
//! if let HookResult::Block { reason } = result {
//!     eprintln!("blocked: {reason}");
//! }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod handler;
pub mod manager;
pub mod result;

pub use handler::HookHandler;
pub use manager::{DEFAULT_PRIORITY, HookManager, HookStats};
pub use result::{HookContext, HookExecution, HookResult};
