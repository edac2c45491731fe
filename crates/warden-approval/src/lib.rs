//! Warden Approval - Confirmation of destructive shell commands.
//!
//! # Flow
//!
//! 1. The [`RiskPolicy`] screens the `command` argument of shell-tool
//!    invocations. Commands that match no pattern pass untouched.
//! 2. If no interactive surface is attached, a risky command is denied.
//! 3. Otherwise the user is asked `Yes` / `No`, racing a timer
//!    (30 seconds by default). Silence counts as denial.
//!
//! [`PermissionGateHandler`] turns denials into [`HookResult::Block`]
//! results with a reason naming the cause.
//!
//! [`HookResult::Block`]: warden_hooks::HookResult::Block

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod error;
pub mod gate;
pub mod handler;
pub mod policy;

pub use error::{ApprovalError, ApprovalResult};
pub use gate::{
    ALLOW_CHOICE, ConfirmationGate, ConfirmationOutcome, DEFAULT_CONFIRMATION_TIMEOUT,
    DEFAULT_SHELL_TOOL, DENY_CHOICE,
};
pub use handler::PermissionGateHandler;
pub use policy::{RiskPattern, RiskPolicy};
