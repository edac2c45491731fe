//! Skill errors.

use thiserror::Error;

/// Errors raised while building topic tables.
#[derive(Debug, Error)]
pub enum SkillError {
    /// A detection pattern failed to compile.
    #[error("invalid pattern for topic {topic}: {pattern}: {source}")]
    InvalidPattern {
        /// Topic the pattern belongs to.
        topic: String,
        /// The offending pattern source.
        pattern: String,
        /// Compiler error.
        #[source]
        source: regex::Error,
    },

    /// Two topics share an id.
    #[error("duplicate topic id: {0}")]
    DuplicateTopic(String),

    /// A topic or document id was empty.
    #[error("empty {0} id")]
    EmptyId(&'static str),
}

/// Result type for skill operations.
pub type SkillResult<T> = Result<T, SkillError>;
