//! CLI theme and styling.

use colored::Colorize;
use warden_approval::ConfirmationOutcome;
use warden_core::NotifyLevel;
use warden_status::ContextLevel;

/// CLI theme configuration.
pub(crate) struct Theme;

impl Theme {
    /// Format a header.
    pub(crate) fn header(text: &str) -> String {
        format!("{}", text.bold().cyan())
    }

    /// Format a success message.
    pub(crate) fn success(text: &str) -> String {
        format!("{} {}", "✓".green(), text)
    }

    /// Format an error message.
    pub(crate) fn error(text: &str) -> String {
        format!("{} {}", "✗".red(), text.red())
    }

    /// Format a warning message.
    pub(crate) fn warning(text: &str) -> String {
        format!("{} {}", "!".yellow(), text.yellow())
    }

    /// Format an info message.
    pub(crate) fn info(text: &str) -> String {
        format!("{} {}", "i".blue(), text)
    }

    /// Format a dimmed message.
    pub(crate) fn dimmed(text: &str) -> String {
        format!("{}", text.dimmed())
    }

    /// Format a key-value pair.
    pub(crate) fn kv(key: &str, value: &str) -> String {
        format!("{}: {}", key.bold(), value)
    }

    /// Format a host notification.
    pub(crate) fn notification(message: &str, level: NotifyLevel) -> String {
        match level {
            NotifyLevel::Info => Self::info(message),
            NotifyLevel::Warning => Self::warning(message),
            NotifyLevel::Error => Self::error(message),
        }
    }

    /// Format the outcome of a confirmation.
    pub(crate) fn outcome(outcome: ConfirmationOutcome) -> String {
        match outcome {
            ConfirmationOutcome::Allow => Self::success("Allowed"),
            other => Self::error(other.block_reason().unwrap_or("Blocked")),
        }
    }

    /// Color a rendered status line by context usage.
    pub(crate) fn status_line(line: &str, level: ContextLevel) -> String {
        match level {
            ContextLevel::Ok => line.to_string(),
            ContextLevel::Warning => line.yellow().to_string(),
            ContextLevel::Error => line.red().to_string(),
        }
    }
}
