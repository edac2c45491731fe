//! Plain-text status line.

use std::path::Path;
use warden_core::SessionStatus;

use crate::usage::{ContextLevel, UsageSummary, format_tokens};

/// Inputs to one status line.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    /// Usage totals.
    pub usage: UsageSummary,
    /// Context window of the active model, `0` when unknown.
    pub context_window: u64,
    /// Last component of the working directory.
    pub folder: String,
    /// Current branch, empty when unknown.
    pub branch: String,
    /// Thinking level; `"off"` is omitted.
    pub thinking_level: String,
    /// Active model id.
    pub model: Option<String>,
}

impl StatusLine {
    /// Build a line from session status and usage.
    #[must_use]
    pub fn new(status: &SessionStatus, usage: UsageSummary, cwd: &Path) -> Self {
        Self {
            usage,
            context_window: status.model.as_ref().map_or(0, |m| m.context_window),
            folder: folder_name(cwd),
            branch: status.branch.clone(),
            thinking_level: "off".to_string(),
            model: status.model.as_ref().map(|m| m.id.clone()),
        }
    }

    /// Set the thinking level.
    #[must_use]
    pub fn with_thinking_level(mut self, level: impl Into<String>) -> Self {
        self.thinking_level = level.into();
        self
    }

    /// Context usage level, for coloring.
    #[must_use]
    pub fn level(&self) -> ContextLevel {
        self.usage.context_level(self.context_window)
    }

    /// Left half: context percentage, token totals, and cost.
    #[must_use]
    pub fn left(&self) -> String {
        format!(
            "{:.1}% ^{} v{} ${:.3}",
            self.usage.context_percent(self.context_window),
            format_tokens(self.usage.total_input),
            format_tokens(self.usage.total_output),
            self.usage.total_cost,
        )
    }

    /// Right half: folder, branch, thinking level, and model.
    #[must_use]
    pub fn right(&self) -> String {
        let thinking = if self.thinking_level == "off" {
            ""
        } else {
            self.thinking_level.as_str()
        };
        let model = self.model.as_deref().unwrap_or("no model");

        [self.folder.as_str(), self.branch.as_str(), thinking, model]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Render to exactly `width` characters or fewer.
    ///
    /// The halves are separated by at least one space.
    #[must_use]
    pub fn render(&self, width: usize) -> String {
        let left = self.left();
        let right = self.right();
        let used = left.chars().count().saturating_add(right.chars().count());
        let padding = width.saturating_sub(used).max(1);

        let line = format!("{left}{}{right}", " ".repeat(padding));
        line.chars().take(width).collect()
    }
}

/// Last path component, or the whole path when there is none.
fn folder_name(cwd: &Path) -> String {
    cwd.file_name().map_or_else(
        || cwd.to_string_lossy().into_owned(),
        |name| name.to_string_lossy().into_owned(),
    )
}
