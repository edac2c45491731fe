//! Host capabilities consumed by Warden handlers.
//!
//! The host runtime owns message delivery, user notification, process
//! execution, and (optionally) an interactive surface. Handlers reach all of
//! them through [`Host`]; none of them are reimplemented here.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{HostError, HostResult};

/// When a scheduled message becomes visible to the agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeliverAs {
    /// Visible starting with the next turn.
    #[default]
    NextTurn,
}

/// A system-originated message scheduled into the agent's context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionMessage {
    /// Message category (e.g. `"auto-skill"`).
    pub custom_type: String,
    /// Topic that produced this message, if any.
    #[serde(default)]
    pub topic: Option<String>,
    /// Message body.
    pub content: String,
    /// Whether the host should render the message to the user.
    pub display: bool,
    /// Delivery timing.
    pub deliver_as: DeliverAs,
}

impl SessionMessage {
    /// Create a hidden next-turn message.
    #[must_use]
    pub fn hidden(custom_type: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            custom_type: custom_type.into(),
            topic: None,
            content: content.into(),
            display: false,
            deliver_as: DeliverAs::NextTurn,
        }
    }

    /// Tag the message with the topic that produced it.
    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }
}

/// Severity of a user notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    /// Informational.
    Info,
    /// Something worth attention.
    Warning,
    /// Something failed.
    Error,
}

impl fmt::Display for NotifyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Captured output of a finished process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    /// Standard output, lossily decoded.
    pub stdout: String,
    /// Standard error, lossily decoded.
    pub stderr: String,
}

/// A surface that can put a multiple-choice question to the user.
#[async_trait]
pub trait InteractiveSurface: Send + Sync {
    /// Ask the user to pick one of `choices`.
    ///
    /// Implementations must resolve promptly once `signal` is cancelled.
    /// Returns `None` if the prompt was dismissed or cancelled.
    async fn select(
        &self,
        prompt: &str,
        choices: &[&str],
        signal: CancellationToken,
    ) -> Option<String>;
}

/// Capabilities the host runtime offers to handlers.
#[async_trait]
pub trait Host: Send + Sync {
    /// Schedule a message into the agent's context.
    fn send_message(&self, message: SessionMessage);

    /// Show a non-blocking status message to the user.
    fn notify(&self, message: &str, level: NotifyLevel);

    /// Run an external process with a timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`HostError`] if the process cannot start, times out, or
    /// exits unsuccessfully.
    async fn exec(&self, program: &str, args: &[&str], timeout: Duration)
    -> HostResult<ExecOutput>;

    /// The interactive surface, if one is attached.
    ///
    /// `None` means the session runs unattended.
    fn interactive_surface(&self) -> Option<&dyn InteractiveSurface>;

    /// Working directory of the agent, if known.
    fn working_dir(&self) -> Option<PathBuf> {
        None
    }
}

/// Run a process to completion with a timeout, capturing its output.
///
/// Hosts can delegate [`Host::exec`] here. stdin is closed; the child is
/// killed if the timeout elapses.
///
/// # Errors
///
/// Returns [`HostError::Spawn`], [`HostError::Timeout`], or
/// [`HostError::NonZeroExit`].
pub async fn run_process(
    program: &str,
    args: &[&str],
    timeout: Duration,
) -> HostResult<ExecOutput> {
    debug!(program = %program, args = ?args, timeout_ms = timeout.as_millis(), "Running process");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let child = cmd.spawn().map_err(|source| HostError::Spawn {
        program: program.to_string(),
        source,
    })?;

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(Ok(output)) => output,
        Ok(Err(source)) => {
            return Err(HostError::Spawn {
                program: program.to_string(),
                source,
            });
        },
        Err(_) => {
            return Err(HostError::Timeout {
                program: program.to_string(),
                timeout,
            });
        },
    };

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();

    if !output.status.success() {
        return Err(HostError::NonZeroExit {
            program: program.to_string(),
            code: output.status.code().unwrap_or(-1),
            stderr,
        });
    }

    Ok(ExecOutput { stdout, stderr })
}
