//! Warden Runtime - Handler pipeline assembly.
//!
//! Turns a loaded configuration into a [`WardenRuntime`]: the confirmation
//! gate first, then the skills handlers, then the status tracker. Hosts feed
//! each event to [`WardenRuntime::dispatch`] together with the session it
//! belongs to.
//!
//! # Example
//!
//! ```rust,ignore
//! use warden_config::Config;
//! use warden_core::HookEvent;
//! use warden_runtime::WardenRuntime;
//!
//! let resolved = Config::load(Some(std::path::Path::new(".")))?;
//! let runtime = WardenRuntime::from_config(&resolved)?;
//! let mut session = runtime.new_session();
//!
//! runtime.dispatch(&HookEvent::SessionStart, &mut session, &host).await;
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config_bridge;
pub mod prelude;

mod error;
mod runtime;

pub use error::{RuntimeError, RuntimeResult};
pub use runtime::{Dispatch, GATE_PRIORITY, SKILLS_PRIORITY, STATUS_PRIORITY, WardenRuntime};
