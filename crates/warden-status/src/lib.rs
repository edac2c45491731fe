//! Warden Status - Ambient session status.
//!
//! [`StatusTracker`] keeps the branch and active model on the session;
//! [`StatusLine`] composes them with token usage into one line of text.
//! Drawing the line is left to the host.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod line;
pub mod tracker;
pub mod usage;

pub use line::StatusLine;
pub use tracker::{DEFAULT_BRANCH_TIMEOUT, StatusTracker};
pub use usage::{AssistantUsage, ContextLevel, UsageSummary, format_tokens};
