//! `warden check`: run the confirmation gate against one command.

use anyhow::Result;
use warden_approval::{ConfirmationOutcome, RiskPattern};
use warden_core::ToolInvocation;
use warden_runtime::config_bridge;

use super::load_config;
use crate::terminal::TerminalHost;
use crate::theme::Theme;

/// Evaluate `command` as if the agent had proposed it.
pub(crate) async fn run_check(command: &str, no_input: bool) -> Result<ConfirmationOutcome> {
    let resolved = load_config()?;
    let gate = config_bridge::to_confirmation_gate(&resolved.config)?;

    let risk = gate.policy().assess(command).map(RiskPattern::description);
    match risk {
        Some(description) => eprintln!("{}", Theme::warning(&format!("Risky: {description}"))),
        None => eprintln!("{}", Theme::dimmed("No risk pattern matched.")),
    }

    let host = if no_input {
        TerminalHost::unattended()
    } else {
        TerminalHost::detect()
    };
    let invocation = ToolInvocation::new(gate.shell_tool()).with_arg("command", command);
    let outcome = gate.evaluate(&invocation, &host).await;

    println!("{}", Theme::outcome(outcome));
    Ok(outcome)
}
