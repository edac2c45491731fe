//! Host backed by the user's terminal.
//!
//! Confirmations go through `dialoguer`. Messages and notifications are
//! written to stderr so stdout stays clean for command output.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use dialoguer::{Select, theme::ColorfulTheme};
use tokio_util::sync::CancellationToken;
use tracing::debug;
use warden_core::{
    ExecOutput, Host, HostResult, InteractiveSurface, NotifyLevel, SessionMessage, run_process,
};

use crate::theme::Theme;

/// Terminal prompt surface.
pub(crate) struct DialoguerSurface;

#[async_trait]
impl InteractiveSurface for DialoguerSurface {
    async fn select(
        &self,
        prompt: &str,
        choices: &[&str],
        signal: CancellationToken,
    ) -> Option<String> {
        let prompt = prompt.to_string();
        let items: Vec<String> = choices.iter().map(ToString::to_string).collect();

        let task = tokio::task::spawn_blocking(move || {
            let index = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .items(&items)
                .default(0)
                .interact_opt()
                .ok()
                .flatten()?;
            items.get(index).cloned()
        });

        tokio::select! {
            joined = task => joined.ok().flatten(),
            () = signal.cancelled() => {
                debug!("Terminal prompt cancelled");
                eprintln!();
                None
            },
        }
    }
}

/// Host for one-shot terminal commands.
pub(crate) struct TerminalHost {
    surface: Option<DialoguerSurface>,
}

impl TerminalHost {
    /// Attach a prompt surface when stdin and stderr are terminals.
    pub(crate) fn detect() -> Self {
        let interactive = std::io::stdin().is_terminal() && std::io::stderr().is_terminal();
        Self {
            surface: interactive.then_some(DialoguerSurface),
        }
    }

    /// A host with no prompt surface.
    pub(crate) fn unattended() -> Self {
        Self { surface: None }
    }
}

#[async_trait]
impl Host for TerminalHost {
    fn send_message(&self, message: SessionMessage) {
        eprintln!(
            "{}",
            Theme::dimmed(&format!("[{}] {} bytes", message.custom_type, message.content.len()))
        );
    }

    fn notify(&self, message: &str, level: NotifyLevel) {
        eprintln!("{}", Theme::notification(message, level));
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
        self.surface
            .as_ref()
            .map(|surface| surface as &dyn InteractiveSurface)
    }

    fn working_dir(&self) -> Option<PathBuf> {
        std::env::current_dir().ok()
    }
}
