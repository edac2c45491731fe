//! Prelude module - commonly used types for convenient import.
//!
//! Use `use warden_approval::prelude::*;` to import all essential types.

// Policy
pub use crate::{RiskPattern, RiskPolicy};

// Gate
pub use crate::{ConfirmationGate, ConfirmationOutcome, PermissionGateHandler};

// Errors
pub use crate::{ApprovalError, ApprovalResult};
