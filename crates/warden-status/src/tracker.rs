//! Keeps the session's branch and model current.

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use warden_core::{HookEvent, HookEventKind, Host};
use warden_hooks::{HookContext, HookHandler, HookResult};

/// Default timeout for the branch query.
pub const DEFAULT_BRANCH_TIMEOUT: Duration = Duration::from_secs(1);

/// Refreshes the branch on session start and turn end, and records the
/// model on turn start.
#[derive(Debug, Clone)]
pub struct StatusTracker {
    branch_timeout: Duration,
}

impl StatusTracker {
    /// Create a tracker with the default branch timeout.
    #[must_use]
    pub fn new() -> Self {
        Self {
            branch_timeout: DEFAULT_BRANCH_TIMEOUT,
        }
    }

    /// Set the branch query timeout.
    #[must_use]
    pub fn with_branch_timeout(mut self, timeout: Duration) -> Self {
        self.branch_timeout = timeout;
        self
    }

    /// Query the current branch. Any failure yields an empty string.
    pub async fn current_branch(&self, host: &dyn Host) -> String {
        match host
            .exec("git", &["branch", "--show-current"], self.branch_timeout)
            .await
        {
            Ok(output) => output.stdout.trim().to_string(),
            Err(e) => {
                debug!(error = %e, "Branch query failed");
                String::new()
            },
        }
    }
}

impl Default for StatusTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HookHandler for StatusTracker {
    fn name(&self) -> &str {
        "status-tracker"
    }

    fn events(&self) -> &[HookEventKind] {
        &[
            HookEventKind::SessionStart,
            HookEventKind::TurnStart,
            HookEventKind::TurnEnd,
        ]
    }

    async fn handle(&self, event: &HookEvent, ctx: &mut HookContext<'_>) -> HookResult {
        match event {
            HookEvent::SessionStart | HookEvent::TurnEnd => {
                ctx.session.status.branch = self.current_branch(ctx.host).await;
            },
            HookEvent::TurnStart { model } => {
                ctx.session.status.model.clone_from(model);
            },
            _ => {},
        }
        HookResult::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use warden_core::{ModelInfo, Session};
    use warden_test::MockHost;

    async fn run(tracker: &StatusTracker, event: &HookEvent, session: &mut Session, host: &MockHost) {
        let mut ctx = HookContext::new(event.kind(), session, host);
        assert_eq!(tracker.handle(event, &mut ctx).await, HookResult::Continue);
    }

    #[tokio::test]
    async fn test_branch_refreshed_and_trimmed() {
        let tracker = StatusTracker::new();
        let host = MockHost::new()
            .with_exec_stdout("main\n")
            .with_exec_stdout("feature/x\n");
        let mut session = Session::new();

        run(&tracker, &HookEvent::SessionStart, &mut session, &host).await;
        assert_eq!(session.status.branch, "main");

        run(&tracker, &HookEvent::TurnEnd, &mut session, &host).await;
        assert_eq!(session.status.branch, "feature/x");

        let calls = host.exec_calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "git");
        assert_eq!(calls[0].1, vec!["branch", "--show-current"]);
    }

    #[tokio::test]
    async fn test_branch_failure_is_empty() {
        let tracker = StatusTracker::new();
        let host = MockHost::new().with_exec_stdout("main\n").with_exec_failure("not a repo");
        let mut session = Session::new();

        run(&tracker, &HookEvent::SessionStart, &mut session, &host).await;
        run(&tracker, &HookEvent::TurnEnd, &mut session, &host).await;
        assert_eq!(session.status.branch, "");
    }

    #[tokio::test]
    async fn test_turn_start_records_model() {
        let tracker = StatusTracker::new();
        let host = MockHost::new();
        let mut session = Session::new();

        let event = HookEvent::TurnStart {
            model: Some(ModelInfo::new("opus").with_context_window(200_000)),
        };
        run(&tracker, &event, &mut session, &host).await;
        assert_eq!(session.status.model.as_ref().map(|m| m.id.as_str()), Some("opus"));
        assert!(host.exec_calls().is_empty());
    }
}
