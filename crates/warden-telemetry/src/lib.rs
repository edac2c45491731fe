//! Warden Telemetry - Logging setup.
//!
//! # Example
//!
//! ```rust,no_run
//! use warden_telemetry::{LogConfig, LogFormat, setup_logging};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = LogConfig::new("debug")
//!     .with_format(LogFormat::Compact)
//!     .with_directive("warden_approval=trace");
//! setup_logging(&config)?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod error;
mod logging;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::{LogConfig, LogFormat, LogTarget, setup_logging};
