//! Token usage accounting.

use serde::{Deserialize, Serialize};

/// Usage reported for one assistant message.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantUsage {
    /// Input tokens.
    pub input: u64,
    /// Output tokens.
    pub output: u64,
    /// Tokens read from the prompt cache.
    pub cache_read: u64,
    /// Tokens written to the prompt cache.
    pub cache_write: u64,
    /// Cost in dollars.
    pub cost: f64,
}

impl AssistantUsage {
    /// Tokens this message occupied in the context window.
    #[must_use]
    pub fn context_tokens(&self) -> u64 {
        self.input
            .saturating_add(self.output)
            .saturating_add(self.cache_read)
            .saturating_add(self.cache_write)
    }
}

/// How full the context window is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextLevel {
    /// At most 70%.
    Ok,
    /// Above 70%.
    Warning,
    /// Above 90%.
    Error,
}

impl ContextLevel {
    /// Classify a percentage.
    #[must_use]
    pub fn from_percent(percent: f64) -> Self {
        if percent > 90.0 {
            Self::Error
        } else if percent > 70.0 {
            Self::Warning
        } else {
            Self::Ok
        }
    }
}

/// Totals over a session's assistant messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageSummary {
    /// Sum of input tokens.
    pub total_input: u64,
    /// Sum of output tokens.
    pub total_output: u64,
    /// Sum of cost.
    pub total_cost: f64,
    /// Context tokens of the most recent message.
    pub context_tokens: u64,
}

impl UsageSummary {
    /// Summarize messages in chronological order.
    #[must_use]
    pub fn from_entries(entries: &[AssistantUsage]) -> Self {
        let mut summary = entries.iter().fold(Self::default(), |mut acc, u| {
            acc.total_input = acc.total_input.saturating_add(u.input);
            acc.total_output = acc.total_output.saturating_add(u.output);
            acc.total_cost += u.cost;
            acc
        });
        summary.context_tokens = entries.last().map_or(0, AssistantUsage::context_tokens);
        summary
    }

    /// Percentage of `context_window` in use; `0` for an unknown window.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn context_percent(&self, context_window: u64) -> f64 {
        if context_window == 0 {
            return 0.0;
        }
        self.context_tokens as f64 / context_window as f64 * 100.0
    }

    /// Level of the context percentage.
    #[must_use]
    pub fn context_level(&self, context_window: u64) -> ContextLevel {
        ContextLevel::from_percent(self.context_percent(context_window))
    }
}

/// Compact token count: `999`, `1.0k`, `12.3k`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn format_tokens(n: u64) -> String {
    if n < 1000 {
        n.to_string()
    } else {
        format!("{:.1}k", n as f64 / 1000.0)
    }
}
