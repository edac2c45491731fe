//! Approval errors.

/// Errors that can occur while building a risk policy.
#[derive(Debug, thiserror::Error)]
pub enum ApprovalError {
    /// A risk pattern failed to compile.
    #[error("invalid risk pattern {pattern}: {source}")]
    InvalidPattern {
        /// The offending pattern source.
        pattern: String,
        /// Compiler error.
        #[source]
        source: regex::Error,
    },

    /// The confirmation timeout is zero.
    #[error("confirmation timeout must be greater than zero")]
    ZeroTimeout,
}

/// Result type for approval operations.
pub type ApprovalResult<T> = Result<T, ApprovalError>;
