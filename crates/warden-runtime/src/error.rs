//! Runtime error types.

use thiserror::Error;

/// Errors that can occur while assembling the runtime.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    ConfigError(#[from] warden_config::ConfigError),

    /// The topic table is invalid.
    #[error("Skills error: {0}")]
    SkillError(#[from] warden_skills::SkillError),

    /// The risk policy or gate settings are invalid.
    #[error("Approval error: {0}")]
    ApprovalError(#[from] warden_approval::ApprovalError),

    /// Logging could not be configured.
    #[error("Telemetry error: {0}")]
    TelemetryError(#[from] warden_telemetry::TelemetryError),
}

/// Result type for runtime operations.
pub type RuntimeResult<T> = Result<T, RuntimeError>;
