//! JSON-lines host for `warden serve`.
//!
//! Each input line is one [`HookEvent`]. For each event the output carries
//! every message and notification the handlers produced, followed by one
//! `result` frame. Lines that fail to parse produce an `error` frame.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tracing::{debug, warn};
use warden_core::{
    ExecOutput, HookEvent, HookEventKind, Host, HostResult, InteractiveSurface, NotifyLevel,
    SessionMessage, run_process,
};
use warden_hooks::HookResult;
use warden_runtime::WardenRuntime;

/// One output line.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum Frame {
    /// Combined handler result for one event.
    Result {
        /// Event the result answers.
        event: HookEventKind,
        /// The result.
        result: HookResult,
    },
    /// A message scheduled into the agent's context.
    Message {
        /// The message.
        message: SessionMessage,
    },
    /// A user notification.
    Notify {
        /// Notification text.
        message: String,
        /// Severity.
        level: NotifyLevel,
    },
    /// An input line that could not be handled.
    Error {
        /// What went wrong.
        message: String,
    },
}

/// Host that queues side effects as frames.
///
/// stdin carries the event stream, so there is no prompt surface.
pub(crate) struct StdioHost {
    outbox: mpsc::UnboundedSender<Frame>,
    working_dir: Option<PathBuf>,
}

impl StdioHost {
    pub(crate) fn new(working_dir: Option<PathBuf>) -> (Self, mpsc::UnboundedReceiver<Frame>) {
        let (outbox, rx) = mpsc::unbounded_channel();
        (
            Self {
                outbox,
                working_dir,
            },
            rx,
        )
    }

    fn push(&self, frame: Frame) {
        if self.outbox.send(frame).is_err() {
            warn!("Output closed, dropping frame");
        }
    }
}

#[async_trait]
impl Host for StdioHost {
    fn send_message(&self, message: SessionMessage) {
        self.push(Frame::Message { message });
    }

    fn notify(&self, message: &str, level: NotifyLevel) {
        self.push(Frame::Notify {
            message: message.to_string(),
            level,
        });
    }

    async fn exec(
        &self,
        program: &str,
        args: &[&str],
        timeout: Duration,
    ) -> HostResult<ExecOutput> {
        run_process(program, args, timeout).await
    }

    fn interactive_surface(&self) -> Option<&dyn InteractiveSurface> {
        None
    }

    fn working_dir(&self) -> Option<PathBuf> {
        self.working_dir.clone()
    }
}

/// Counters for one serve run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ServeStats {
    pub(crate) events: usize,
    pub(crate) blocked: usize,
    pub(crate) errors: usize,
}

/// Read events from `reader` until EOF, writing frames to `writer`.
///
/// All events share one session.
pub(crate) async fn serve<R, W>(
    runtime: &WardenRuntime,
    reader: R,
    mut writer: W,
    working_dir: Option<PathBuf>,
) -> Result<ServeStats>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let (host, mut outbox) = StdioHost::new(working_dir);
    let mut session = runtime.new_session();
    let mut stats = ServeStats::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let frame = match serde_json::from_str::<HookEvent>(line) {
            Ok(event) => {
                stats.events = stats.events.saturating_add(1);
                let dispatch = runtime.dispatch(&event, &mut session, &host).await;
                if dispatch.result.is_blocking() {
                    stats.blocked = stats.blocked.saturating_add(1);
                }
                while let Ok(side_effect) = outbox.try_recv() {
                    write_frame(&mut writer, &side_effect).await?;
                }
                Frame::Result {
                    event: event.kind(),
                    result: dispatch.result,
                }
            },
            Err(e) => {
                warn!(error = %e, "Unreadable event");
                stats.errors = stats.errors.saturating_add(1);
                Frame::Error {
                    message: e.to_string(),
                }
            },
        };
        write_frame(&mut writer, &frame).await?;
    }

    debug!(?stats, "Input closed");
    Ok(stats)
}

async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, frame: &Frame) -> Result<()> {
    let mut line = serde_json::to_vec(frame)?;
    line.push(b'\n');
    writer.write_all(&line).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use std::sync::Arc;
    use warden_config::Config;
    use warden_skills::MemoryDocumentStore;

    fn runtime() -> WardenRuntime {
        let mut cfg = Config::default();
        cfg.status.enabled = false;
        let store = MemoryDocumentStore::new()
            .with_document("python-dev-guidelines", "Use type hints.")
            .with_document("shell-script-guidelines", "Quote variables.");
        WardenRuntime::with_store(&cfg, Arc::new(store)).unwrap()
    }

    async fn run(input: &str) -> (ServeStats, Vec<Value>) {
        let mut output = Vec::new();
        let stats = serve(&runtime(), input.as_bytes(), &mut output, None)
            .await
            .unwrap();
        let frames = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        (stats, frames)
    }

    #[tokio::test]
    async fn test_prompt_event_appends_once() {
        let input = concat!(
            r#"{"type":"session_start"}"#,
            "\n",
            r#"{"type":"before_agent_start","prompt":"write a python script"}"#,
            "\n",
            r#"{"type":"before_agent_start","prompt":"more python please"}"#,
            "\n",
        );
        let (stats, frames) = run(input).await;

        assert_eq!(stats.events, 3);
        assert_eq!(frames.len(), 3);
        assert_eq!(frames[1]["kind"], "result");
        assert_eq!(frames[1]["event"], "before_agent_start");
        assert_eq!(frames[1]["result"]["action"], "append_instructions");
        assert_eq!(frames[1]["result"]["text"], "\n\nUse type hints.");
        assert_eq!(frames[2]["result"]["action"], "continue");
    }

    #[tokio::test]
    async fn test_tool_call_emits_side_effects_before_result() {
        let input = r#"{"type":"tool_call","tool_name":"read","input":{"path":"deploy.sh"}}"#;
        let (_, frames) = run(input).await;

        let kinds: Vec<_> = frames.iter().map(|f| f["kind"].as_str().unwrap()).collect();
        assert_eq!(kinds, vec!["message", "notify", "result"]);
        assert_eq!(frames[0]["message"]["custom_type"], "auto-skill");
        assert_eq!(frames[1]["level"], "info");
    }

    #[tokio::test]
    async fn test_risky_command_denied_without_surface() {
        let input = r#"{"type":"tool_call","tool_name":"bash","input":{"command":"rm -rf build"}}"#;
        let (stats, frames) = run(input).await;

        assert_eq!(stats.blocked, 1);
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["result"]["action"], "block");
    }

    #[tokio::test]
    async fn test_bad_line_reports_error_and_continues() {
        let input = "not json\n\n{\"type\":\"turn_end\"}\n";
        let (stats, frames) = run(input).await;

        assert_eq!(stats.errors, 1);
        assert_eq!(stats.events, 1);
        assert_eq!(frames[0]["kind"], "error");
        assert_eq!(frames[1]["event"], "turn_end");
    }
}
