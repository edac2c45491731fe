//! Risk policy: which shell commands need confirmation.
//!
//! The policy is an ordered list of [`RiskPattern`]s. A command is risky if
//! any pattern occurs anywhere in it. This is an advisory screen, not a
//! sandbox: commands that obfuscate their intent will pass.

use regex::{Regex, RegexBuilder};

use crate::error::{ApprovalError, ApprovalResult};

/// A compiled pattern flagging a class of destructive commands.
#[derive(Debug, Clone)]
pub struct RiskPattern {
    regex: Regex,
    description: String,
}

impl RiskPattern {
    /// Compile a risk pattern.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::InvalidPattern`] if `pattern` does not compile.
    pub fn new(
        pattern: &str,
        ignore_case: bool,
        description: impl Into<String>,
    ) -> ApprovalResult<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(ignore_case)
            .build()
            .map_err(|source| ApprovalError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            regex,
            description: description.into(),
        })
    }

    /// Pattern source.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Short description of what the pattern catches.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the pattern occurs in `command`.
    #[must_use]
    pub fn is_match(&self, command: &str) -> bool {
        self.regex.is_match(command)
    }
}

/// Ordered set of risk patterns.
#[derive(Debug, Clone, Default)]
pub struct RiskPolicy {
    patterns: Vec<RiskPattern>,
}

impl RiskPolicy {
    /// Create a policy from compiled patterns.
    #[must_use]
    pub fn new(patterns: Vec<RiskPattern>) -> Self {
        Self { patterns }
    }

    /// The built-in policy: recursive `rm`, `sudo`, and `chmod`/`chown` to
    /// `777`, all case-insensitive.
    ///
    /// # Errors
    ///
    /// Only fails if a built-in pattern is malformed.
    pub fn with_defaults() -> ApprovalResult<Self> {
        Ok(Self::new(vec![
            RiskPattern::new(r"(?-u:\b)rm\s+(-rf?|--recursive)", true, "recursive delete")?,
            RiskPattern::new(r"(?-u:\b)sudo(?-u:\b)", true, "privilege escalation")?,
            RiskPattern::new(
                r"(?-u:\b)(chmod|chown)(?-u:\b).*777",
                true,
                "world-writable permissions",
            )?,
        ]))
    }

    /// The first pattern that flags `command`, if any.
    #[must_use]
    pub fn assess(&self, command: &str) -> Option<&RiskPattern> {
        self.patterns.iter().find(|p| p.is_match(command))
    }

    /// Whether `command` needs confirmation.
    #[must_use]
    pub fn is_risky(&self, command: &str) -> bool {
        self.assess(command).is_some()
    }

    /// The patterns, in order.
    #[must_use]
    pub fn patterns(&self) -> &[RiskPattern] {
        &self.patterns
    }
}
