//! Prelude module - commonly used types for convenient import.
//!
//! Use `use warden_telemetry::prelude::*;` to import all essential types.

pub use crate::{LogConfig, LogFormat, LogTarget, setup_logging};
pub use crate::{TelemetryError, TelemetryResult};
