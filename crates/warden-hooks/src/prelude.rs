//! Prelude module - commonly used types for convenient import.
//!
//! Use `use warden_hooks::prelude::*;` to import all essential types.

// Handler trait
pub use crate::HookHandler;

// Dispatcher
pub use crate::{HookManager, HookStats};

// Results and context
pub use crate::{HookContext, HookExecution, HookResult};
