//! `warden status`: render the footer for the current directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use warden_core::{HookEvent, Host, ModelInfo};
use warden_runtime::WardenRuntime;
use warden_status::{AssistantUsage, StatusLine, UsageSummary};

use super::load_config;
use crate::terminal::TerminalHost;
use crate::theme::Theme;

/// Inputs for one footer render.
pub(crate) struct StatusArgs {
    pub(crate) width: usize,
    pub(crate) model: Option<String>,
    pub(crate) context_window: u64,
    pub(crate) thinking: String,
    pub(crate) usage: Option<PathBuf>,
}

/// Replay a session start and one turn, then print the footer.
pub(crate) async fn run_status(args: StatusArgs) -> Result<()> {
    let resolved = load_config()?;
    let runtime = WardenRuntime::from_config(&resolved)?;
    let host = TerminalHost::unattended();
    let mut session = runtime.new_session();

    runtime
        .dispatch(&HookEvent::SessionStart, &mut session, &host)
        .await;
    let model = args
        .model
        .map(|id| ModelInfo::new(id).with_context_window(args.context_window));
    runtime
        .dispatch(&HookEvent::TurnStart { model }, &mut session, &host)
        .await;

    let entries = match &args.usage {
        Some(path) => read_usage(path)?,
        None => Vec::new(),
    };
    let cwd = host
        .working_dir()
        .context("could not determine the working directory")?;
    let line = StatusLine::new(&session.status, UsageSummary::from_entries(&entries), &cwd)
        .with_thinking_level(args.thinking);

    println!("{}", Theme::status_line(&line.render(args.width), line.level()));
    Ok(())
}

fn read_usage(path: &std::path::Path) -> Result<Vec<AssistantUsage>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid usage file {}", path.display()))
}
