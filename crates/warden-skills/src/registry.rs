//! Topic registry and detection.

use std::collections::HashSet;
use tracing::trace;

use crate::error::{SkillError, SkillResult};
use crate::topic::{PatternRule, Topic, TopicId};

/// An ordered, immutable set of topics.
#[derive(Debug, Clone, Default)]
pub struct TopicRegistry {
    topics: Vec<Topic>,
}

impl TopicRegistry {
    /// Build a registry, keeping declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`SkillError::DuplicateTopic`] if two topics share an id.
    pub fn new(topics: Vec<Topic>) -> SkillResult<Self> {
        let mut seen = HashSet::new();
        for topic in &topics {
            if !seen.insert(topic.id().as_str()) {
                return Err(SkillError::DuplicateTopic(topic.id().to_string()));
            }
        }
        Ok(Self { topics })
    }

    /// The built-in python / shell / search topics.
    ///
    /// # Errors
    ///
    /// Only fails if a built-in pattern is malformed.
    pub fn with_defaults() -> SkillResult<Self> {
        Self::new(default_topics()?)
    }

    /// Topics in declaration order.
    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Look up a topic by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id().as_str() == id)
    }

    /// Number of topics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    /// Whether the registry has no topics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    /// Topics that match `text` and are not in `already_triggered`, in
    /// declaration order.
    pub fn matching<'a>(
        &'a self,
        text: &'a str,
        already_triggered: &'a HashSet<String>,
    ) -> impl Iterator<Item = &'a Topic> + 'a {
        self.topics
            .iter()
            .filter(move |t| !already_triggered.contains(t.id().as_str()))
            .filter(move |t| {
                let hit = t.matches(text);
                if hit {
                    trace!(topic = %t.id(), "Topic pattern matched");
                }
                hit
            })
    }

    /// Ids of the topics `text` newly triggers.
    ///
    /// Pure: committing the ids to the session tracker is up to the caller.
    #[must_use]
    pub fn detect(&self, text: &str, already_triggered: &HashSet<String>) -> Vec<TopicId> {
        self.matching(text, already_triggered)
            .map(|t| t.id().clone())
            .collect()
    }
}

/// The built-in topic table.
///
/// # Errors
///
/// Only fails if a built-in pattern is malformed.
pub fn default_topics() -> SkillResult<Vec<Topic>> {
    Ok(vec![
        Topic::new(
            "python",
            "python-dev-guidelines",
            vec![
                PatternRule::exact(r"\.py(?-u:\b)"),
                PatternRule::ignore_case(r"(?-u:\b)python(?-u:\b)"),
                PatternRule::ignore_case(r"(?-u:\b)pytest(?-u:\b)"),
                PatternRule::ignore_case(r"(?-u:\b)pip(?-u:\b)"),
                PatternRule::ignore_case(r"(?-u:\b)poetry(?-u:\b)"),
            ],
        )?,
        Topic::new(
            "shell",
            "shell-script-guidelines",
            vec![
                PatternRule::exact(r"\.sh(?-u:\b)"),
                PatternRule::ignore_case(r"(?-u:\b)bash(?-u:\b)"),
                PatternRule::ignore_case(r"(?-u:\b)shell\s+script"),
                PatternRule::ignore_case(r"(?-u:\b)zsh(?-u:\b)"),
            ],
        )?,
        Topic::new(
            "search",
            "brave-search",
            vec![
                PatternRule::ignore_case(
                    r"(?-u:\b)search\s+(the\s+)?(web|internet|online)(?-u:\b)",
                ),
                PatternRule::ignore_case(r"(?-u:\b)google(?-u:\b)"),
                PatternRule::ignore_case(r"(?-u:\b)brave\s+search(?-u:\b)"),
            ],
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> TopicRegistry {
        TopicRegistry::with_defaults().unwrap()
    }

    fn ids(v: &[TopicId]) -> Vec<&str> {
        v.iter().map(TopicId::as_str).collect()
    }

    #[test]
    fn test_detect_in_declaration_order() {
        let fired = registry().detect(
            "Write a bash script that runs pytest",
            &HashSet::new(),
        );
        assert_eq!(ids(&fired), vec!["python", "shell"]);
    }

    #[test]
    fn test_already_triggered_is_skipped() {
        let delivered: HashSet<String> = ["python".to_string()].into();
        let fired = registry().detect("Fix my Python code", &delivered);
        assert!(fired.is_empty());
    }

    #[test]
    fn test_no_match() {
        assert!(registry().detect("What's the weather?", &HashSet::new()).is_empty());
    }

    #[test]
    fn test_case_sensitive_extension() {
        let r = registry();
        assert_eq!(ids(&r.detect("edit main.py", &HashSet::new())), vec!["python"]);
        assert!(r.detect("EDIT MAIN.PY", &HashSet::new()).is_empty());
    }

    #[test]
    fn test_search_phrases() {
        let r = registry();
        assert_eq!(
            ids(&r.detect("please search the web for it", &HashSet::new())),
            vec!["search"]
        );
        assert_eq!(
            ids(&r.detect("Search online", &HashSet::new())),
            vec!["search"]
        );
        assert!(r.detect("search the codebase", &HashSet::new()).is_empty());
    }

    #[test]
    fn test_word_boundaries() {
        let r = registry();
        // "pipeline" must not trigger the pip keyword
        assert!(r.detect("build the pipeline", &HashSet::new()).is_empty());
        // "bashful" must not trigger the bash keyword
        assert!(r.detect("a bashful reply", &HashSet::new()).is_empty());
    }

    #[test]
    fn test_keywords_next_to_non_ascii_letters() {
        let r = registry();
        assert_eq!(
            ids(&r.detect("pythonでスクリプトを書いて", &HashSet::new())),
            vec!["python"]
        );
        assert_eq!(ids(&r.detect("用python写脚本", &HashSet::new())), vec!["python"]);
        assert_eq!(ids(&r.detect("deploy.shを直して", &HashSet::new())), vec!["shell"]);
        assert!(r.detect("épipeline", &HashSet::new()).is_empty());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let a = Topic::new("x", "doc-a", vec![]).unwrap();
        let b = Topic::new("x", "doc-b", vec![]).unwrap();
        assert!(matches!(
            TopicRegistry::new(vec![a, b]),
            Err(SkillError::DuplicateTopic(id)) if id == "x"
        ));
    }

    #[test]
    fn test_get_and_len() {
        let r = registry();
        assert_eq!(r.len(), 3);
        assert_eq!(
            r.get("search").map(|t| t.document().as_str()),
            Some("brave-search")
        );
        assert!(r.get("rust").is_none());
    }
}
