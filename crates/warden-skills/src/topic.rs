//! Topics: named detection pattern sets bound to a guidance document.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{SkillError, SkillResult};

/// Identifier of a topic (e.g. `"python"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TopicId(String);

impl TopicId {
    /// Create a topic id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TopicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TopicId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Identifier of a guidance document (e.g. `"python-dev-guidelines"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    /// Create a document id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Source form of a detection pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternRule {
    /// Regular expression, searched anywhere in the text.
    pub regex: String,
    /// Match without regard to case.
    #[serde(default)]
    pub ignore_case: bool,
}

impl PatternRule {
    /// A case-sensitive pattern.
    #[must_use]
    pub fn exact(regex: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            ignore_case: false,
        }
    }

    /// A case-insensitive pattern.
    #[must_use]
    pub fn ignore_case(regex: impl Into<String>) -> Self {
        Self {
            regex: regex.into(),
            ignore_case: true,
        }
    }
}

/// A topic with its compiled patterns.
#[derive(Debug, Clone)]
pub struct Topic {
    id: TopicId,
    document: DocumentId,
    rules: Vec<PatternRule>,
    patterns: Vec<Regex>,
}

impl Topic {
    /// Compile a topic.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::EmptyId`] for an empty id and
    /// [`SkillError::InvalidPattern`] if a pattern does not compile.
    pub fn new(
        id: impl Into<TopicId>,
        document: impl Into<DocumentId>,
        rules: Vec<PatternRule>,
    ) -> SkillResult<Self> {
        let id = id.into();
        let document = document.into();
        if id.as_str().is_empty() {
            return Err(SkillError::EmptyId("topic"));
        }
        if document.as_str().is_empty() {
            return Err(SkillError::EmptyId("document"));
        }

        let patterns = rules
            .iter()
            .map(|rule| {
                RegexBuilder::new(&rule.regex)
                    .case_insensitive(rule.ignore_case)
                    .build()
                    .map_err(|source| SkillError::InvalidPattern {
                        topic: id.to_string(),
                        pattern: rule.regex.clone(),
                        source,
                    })
            })
            .collect::<SkillResult<Vec<_>>>()?;

        Ok(Self {
            id,
            document,
            rules,
            patterns,
        })
    }

    /// Topic id.
    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    /// Document delivered when the topic fires.
    #[must_use]
    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    /// Pattern sources, in declaration order.
    #[must_use]
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Whether any pattern occurs in `text`.
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
    }
}
