//! The confirmation gate.
//!
//! ```text
//! Idle ──no risk──────────────▶ Allowed
//!  │
//!  ├──risk, no surface────────▶ Denied(no interactive)
//!  │
//!  └──risk, surface───▶ Awaiting ──"Yes"────▶ Allowed
//!                         │   └───"No"/none─▶ Denied(user)
//!                         └──timer──────────▶ Denied(timeout)
//! ```
//!
//! The timer exists only while [`Awaiting`](ConfirmationGate::confirm) and is
//! dropped on every exit from it. When it fires, the cancellation signal
//! handed to the surface is cancelled so the prompt can close itself.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use warden_core::{Host, InteractiveSurface, ToolInvocation};

use crate::error::{ApprovalError, ApprovalResult};
use crate::policy::RiskPolicy;

/// Default name of the shell tool.
pub const DEFAULT_SHELL_TOOL: &str = "bash";

/// Default time the user has to answer.
pub const DEFAULT_CONFIRMATION_TIMEOUT: Duration = Duration::from_secs(30);

/// Choice that allows the command.
pub const ALLOW_CHOICE: &str = "Yes";

/// Choice that denies the command.
pub const DENY_CHOICE: &str = "No";

/// Outcome of gating one invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationOutcome {
    /// The invocation may proceed.
    Allow,
    /// The user declined or dismissed the prompt.
    DeniedByUser,
    /// The prompt was not answered in time.
    DeniedByTimeout,
    /// The command was risky and nobody could be asked.
    DeniedNoInteractive,
}

impl ConfirmationOutcome {
    /// Whether the invocation may proceed.
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Reason reported when the invocation is blocked.
    #[must_use]
    pub fn block_reason(self) -> Option<&'static str> {
        match self {
            Self::Allow => None,
            Self::DeniedByUser => Some("Blocked by user"),
            Self::DeniedByTimeout => Some("Timed out"),
            Self::DeniedNoInteractive => {
                Some("Dangerous command blocked (no UI for confirmation)")
            },
        }
    }
}

/// Screens shell invocations and confirms risky ones with the user.
#[derive(Debug, Clone)]
pub struct ConfirmationGate {
    policy: RiskPolicy,
    shell_tool: String,
    timeout: Duration,
}

impl ConfirmationGate {
    /// Create a gate for the `bash` tool with a 30 second timeout.
    #[must_use]
    pub fn new(policy: RiskPolicy) -> Self {
        Self {
            policy,
            shell_tool: DEFAULT_SHELL_TOOL.to_string(),
            timeout: DEFAULT_CONFIRMATION_TIMEOUT,
        }
    }

    /// Gate a different tool name.
    #[must_use]
    pub fn with_shell_tool(mut self, tool: impl Into<String>) -> Self {
        self.shell_tool = tool.into();
        self
    }

    /// Set the confirmation timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::ZeroTimeout`] for a zero duration.
    pub fn with_timeout(mut self, timeout: Duration) -> ApprovalResult<Self> {
        if timeout.is_zero() {
            return Err(ApprovalError::ZeroTimeout);
        }
        self.timeout = timeout;
        Ok(self)
    }

    /// The risk policy.
    #[must_use]
    pub fn policy(&self) -> &RiskPolicy {
        &self.policy
    }

    /// The gated tool name.
    #[must_use]
    pub fn shell_tool(&self) -> &str {
        &self.shell_tool
    }

    /// The confirmation timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Prompt shown for `command`.
    #[must_use]
    pub fn prompt_text(&self, command: &str) -> String {
        format!(
            "⚠️ Dangerous command:\n\n  {command}\n\nAllow? (auto-deny in {}s)",
            self.timeout.as_secs()
        )
    }

    /// Decide whether `invocation` may proceed.
    ///
    /// Invocations of other tools, and shell invocations without a
    /// `command` argument, are allowed without inspection.
    pub async fn evaluate(&self, invocation: &ToolInvocation, host: &dyn Host) -> ConfirmationOutcome {
        if !invocation.is_tool(&self.shell_tool) {
            return ConfirmationOutcome::Allow;
        }
        let Some(command) = invocation.command() else {
            return ConfirmationOutcome::Allow;
        };

        let Some(risk) = self.policy.assess(command) else {
            return ConfirmationOutcome::Allow;
        };
        info!(tool = %invocation.tool_name, risk = risk.description(), "Risky command needs confirmation");

        let Some(surface) = host.interactive_surface() else {
            warn!(tool = %invocation.tool_name, "No interactive surface, denying risky command");
            return ConfirmationOutcome::DeniedNoInteractive;
        };

        self.confirm(surface, command).await
    }

    /// Race the confirmation prompt for `command` against the timeout.
    pub async fn confirm(&self, surface: &dyn InteractiveSurface, command: &str) -> ConfirmationOutcome {
        let signal = CancellationToken::new();
        let prompt = self.prompt_text(command);
        let choices = [ALLOW_CHOICE, DENY_CHOICE];

        let outcome = tokio::select! {
            biased;
            choice = surface.select(&prompt, &choices, signal.clone()) => {
                match choice.as_deref() {
                    Some(ALLOW_CHOICE) => ConfirmationOutcome::Allow,
                    _ => ConfirmationOutcome::DeniedByUser,
                }
            },
            () = tokio::time::sleep(self.timeout) => {
                signal.cancel();
                ConfirmationOutcome::DeniedByTimeout
            },
        };

        debug!(?outcome, "Confirmation resolved");
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_test::{MockHost, MockSurface, SurfaceResponse, bash_call, file_call};

    fn gate() -> ConfirmationGate {
        ConfirmationGate::new(RiskPolicy::with_defaults().unwrap())
    }

    fn host_with(response: SurfaceResponse) -> MockHost {
        MockHost::new().with_surface(MockSurface::new().with_response(response))
    }

    fn surface(host: &MockHost) -> &MockSurface {
        host.surface().unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_safe_command_never_prompts() {
        let host = host_with(SurfaceResponse::choose("No"));
        let start = tokio::time::Instant::now();

        let outcome = gate().evaluate(&bash_call("ls -la"), &host).await;

        assert_eq!(outcome, ConfirmationOutcome::Allow);
        assert_eq!(surface(&host).prompt_count(), 0);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_tools_are_not_gated() {
        let host = host_with(SurfaceResponse::choose("No"));
        let inv = file_call("write", "notes.txt").with_arg("command", "sudo rm -rf /");
        assert_eq!(gate().evaluate(&inv, &host).await, ConfirmationOutcome::Allow);
        assert_eq!(surface(&host).prompt_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_surface_denies_synchronously() {
        let host = MockHost::new();
        let outcome = gate().evaluate(&bash_call("sudo reboot"), &host).await;
        assert_eq!(outcome, ConfirmationOutcome::DeniedNoInteractive);
        assert_eq!(
            outcome.block_reason(),
            Some("Dangerous command blocked (no UI for confirmation)")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_user_allows_before_timeout() {
        let host = host_with(SurfaceResponse::choose_after("Yes", Duration::from_secs(5)));
        let start = tokio::time::Instant::now();

        let outcome = gate().evaluate(&bash_call("rm -rf /tmp/x"), &host).await;
        assert_eq!(outcome, ConfirmationOutcome::Allow);
        assert_eq!(start.elapsed(), Duration::from_secs(5));

        // The timer is gone: nothing cancels the signal afterwards.
        tokio::time::sleep(Duration::from_secs(60)).await;
        let prompts = surface(&host).prompts();
        assert_eq!(prompts.len(), 1);
        assert!(!prompts[0].signal.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_user_denies() {
        let host = host_with(SurfaceResponse::choose("No"));
        let outcome = gate().evaluate(&bash_call("sudo apt install jq"), &host).await;
        assert_eq!(outcome, ConfirmationOutcome::DeniedByUser);
        assert_eq!(outcome.block_reason(), Some("Blocked by user"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismissed_prompt_is_user_denial() {
        let host = host_with(SurfaceResponse::dismiss());
        let outcome = gate().evaluate(&bash_call("chmod 777 run.sh"), &host).await;
        assert_eq!(outcome, ConfirmationOutcome::DeniedByUser);
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_cancels_signal() {
        let host = host_with(SurfaceResponse::WaitForCancel);
        let start = tokio::time::Instant::now();

        let outcome = gate().evaluate(&bash_call("rm -rf /"), &host).await;

        assert_eq!(outcome, ConfirmationOutcome::DeniedByTimeout);
        assert_eq!(outcome.block_reason(), Some("Timed out"));
        assert_eq!(start.elapsed(), Duration::from_secs(30));
        assert!(surface(&host).prompts()[0].signal.is_cancelled());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout_even_if_surface_ignores_signal() {
        let host = host_with(SurfaceResponse::Hang);
        let outcome = gate().evaluate(&bash_call("sudo su"), &host).await;
        assert_eq!(outcome, ConfirmationOutcome::DeniedByTimeout);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_answer_loses_to_timer() {
        let host = host_with(SurfaceResponse::choose_after("Yes", Duration::from_secs(31)));
        let outcome = gate().evaluate(&bash_call("rm -r build"), &host).await;
        assert_eq!(outcome, ConfirmationOutcome::DeniedByTimeout);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_timeout_and_prompt_text() {
        let gate = gate().with_timeout(Duration::from_secs(5)).unwrap();
        let host = host_with(SurfaceResponse::WaitForCancel);
        let start = tokio::time::Instant::now();

        gate.evaluate(&bash_call("sudo ls"), &host).await;

        assert_eq!(start.elapsed(), Duration::from_secs(5));
        let prompts = surface(&host).prompts();
        assert_eq!(
            prompts[0].prompt,
            "⚠️ Dangerous command:\n\n  sudo ls\n\nAllow? (auto-deny in 5s)"
        );
        assert_eq!(prompts[0].choices, vec!["Yes", "No"]);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(matches!(
            gate().with_timeout(Duration::ZERO),
            Err(ApprovalError::ZeroTimeout)
        ));
    }

    #[tokio::test]
    async fn test_missing_command_is_allowed() {
        let host = MockHost::new();
        let inv = ToolInvocation::new("bash");
        assert_eq!(gate().evaluate(&inv, &host).await, ConfirmationOutcome::Allow);
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_string(&ConfirmationOutcome::DeniedByTimeout).unwrap();
        assert_eq!(json, "\"denied_by_timeout\"");
        assert!(ConfirmationOutcome::Allow.is_allowed());
        assert!(ConfirmationOutcome::Allow.block_reason().is_none());
    }
}
