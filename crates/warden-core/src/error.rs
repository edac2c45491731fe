//! Errors reported by host capabilities.

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when calling into the host.
#[derive(Debug, Error)]
pub enum HostError {
    /// The process could not be started.
    #[error("failed to spawn {program}: {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The process did not finish in time.
    #[error("{program} timed out after {timeout:?}")]
    Timeout {
        /// Program that timed out.
        program: String,
        /// The timeout that elapsed.
        timeout: Duration,
    },

    /// The process exited with a non-zero status.
    #[error("{program} exited with code {code}")]
    NonZeroExit {
        /// Program that failed.
        program: String,
        /// Exit code (`-1` when terminated by a signal).
        code: i32,
        /// Captured stderr.
        stderr: String,
    },

    /// The capability is not offered by this host.
    #[error("host capability unavailable: {0}")]
    Unavailable(String),
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;
