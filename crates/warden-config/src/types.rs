//! Configuration struct definitions.
//!
//! Every section is `#[serde(default)]`, so a partial file deserializes and
//! the missing fields take their built-in values. The `Default` impls mirror
//! `defaults.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Top-level Warden configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging and tracing.
    pub logging: LoggingSection,
    /// Guidance-document injection.
    pub skills: SkillsSection,
    /// Shell command confirmation.
    pub approval: ApprovalSection,
    /// Branch and model tracking.
    pub status: StatusSection,
}

// ---------------------------------------------------------------------------
// LoggingSection
// ---------------------------------------------------------------------------

/// Logging and tracing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Global log level filter (`"trace"`, `"debug"`, `"info"`, `"warn"`,
    /// `"error"`).
    pub level: String,
    /// Output format: `"pretty"`, `"compact"`, `"json"`, or `"full"`.
    pub format: String,
    /// Per-crate tracing directives (e.g. `["warden_skills=debug"]`).
    pub directives: Vec<String>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: "compact".to_owned(),
            directives: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// SkillsSection
// ---------------------------------------------------------------------------

/// One detection pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSection {
    /// Regular expression.
    pub regex: String,
    /// Match without regard to case.
    #[serde(default)]
    pub ignore_case: bool,
}

impl PatternSection {
    fn new(regex: &str, ignore_case: bool) -> Self {
        Self {
            regex: regex.to_owned(),
            ignore_case,
        }
    }
}

/// One topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSection {
    /// Topic id, unique within the table.
    pub id: String,
    /// Document delivered when the topic fires.
    pub document: String,
    /// Detection patterns, in order.
    #[serde(default)]
    pub patterns: Vec<PatternSection>,
}

/// Guidance-document injection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsSection {
    /// Register the injection handlers.
    pub enabled: bool,
    /// Document store root. Defaults to `<warden home>/skills`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_dir: Option<PathBuf>,
    /// File name read inside each document directory.
    pub document_file: String,
    /// Topic table, in detection order.
    pub topics: Vec<TopicSection>,
}

impl Default for SkillsSection {
    fn default() -> Self {
        Self {
            enabled: true,
            base_dir: None,
            document_file: "SKILL.md".to_owned(),
            topics: vec![
                TopicSection {
                    id: "python".to_owned(),
                    document: "python-dev-guidelines".to_owned(),
                    patterns: vec![
                        PatternSection::new(r"\.py(?-u:\b)", false),
                        PatternSection::new(r"(?-u:\b)python(?-u:\b)", true),
                        PatternSection::new(r"(?-u:\b)pytest(?-u:\b)", true),
                        PatternSection::new(r"(?-u:\b)pip(?-u:\b)", true),
                        PatternSection::new(r"(?-u:\b)poetry(?-u:\b)", true),
                    ],
                },
                TopicSection {
                    id: "shell".to_owned(),
                    document: "shell-script-guidelines".to_owned(),
                    patterns: vec![
                        PatternSection::new(r"\.sh(?-u:\b)", false),
                        PatternSection::new(r"(?-u:\b)bash(?-u:\b)", true),
                        PatternSection::new(r"(?-u:\b)shell\s+script", true),
                        PatternSection::new(r"(?-u:\b)zsh(?-u:\b)", true),
                    ],
                },
                TopicSection {
                    id: "search".to_owned(),
                    document: "brave-search".to_owned(),
                    patterns: vec![
                        PatternSection::new(
                            r"(?-u:\b)search\s+(the\s+)?(web|internet|online)(?-u:\b)",
                            true,
                        ),
                        PatternSection::new(r"(?-u:\b)google(?-u:\b)", true),
                        PatternSection::new(r"(?-u:\b)brave\s+search(?-u:\b)", true),
                    ],
                },
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// ApprovalSection
// ---------------------------------------------------------------------------

/// One risk pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPatternSection {
    /// Regular expression over the command string.
    pub regex: String,
    /// Match without regard to case.
    #[serde(default = "default_true")]
    pub ignore_case: bool,
    /// Short description shown in logs.
    #[serde(default)]
    pub description: String,
}

impl RiskPatternSection {
    fn new(regex: &str, description: &str) -> Self {
        Self {
            regex: regex.to_owned(),
            ignore_case: true,
            description: description.to_owned(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Shell command confirmation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApprovalSection {
    /// Register the confirmation gate.
    pub enabled: bool,
    /// Name of the gated shell tool.
    pub shell_tool: String,
    /// Seconds the user has to answer.
    pub timeout_secs: u64,
    /// Commands matching any of these need confirmation.
    pub risk_patterns: Vec<RiskPatternSection>,
}

impl Default for ApprovalSection {
    fn default() -> Self {
        Self {
            enabled: true,
            shell_tool: "bash".to_owned(),
            timeout_secs: 30,
            risk_patterns: vec![
                RiskPatternSection::new(r"(?-u:\b)rm\s+(-rf?|--recursive)", "recursive delete"),
                RiskPatternSection::new(r"(?-u:\b)sudo(?-u:\b)", "privilege escalation"),
                RiskPatternSection::new(
                    r"(?-u:\b)(chmod|chown)(?-u:\b).*777",
                    "world-writable permissions",
                ),
            ],
        }
    }
}

// ---------------------------------------------------------------------------
// StatusSection
// ---------------------------------------------------------------------------

/// Branch and model tracking settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusSection {
    /// Register the status tracker.
    pub enabled: bool,
    /// Timeout for the branch query, in milliseconds.
    pub branch_timeout_ms: u64,
}

impl Default for StatusSection {
    fn default() -> Self {
        Self {
            enabled: true,
            branch_timeout_ms: 1000,
        }
    }
}
