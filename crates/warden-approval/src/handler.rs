//! Hook handler wrapping the confirmation gate.

use async_trait::async_trait;
use tracing::info;
use warden_core::{HookEvent, HookEventKind};
use warden_hooks::{HookContext, HookHandler, HookResult};

use crate::gate::ConfirmationGate;

/// Blocks risky shell invocations the user did not confirm.
#[derive(Debug, Clone)]
pub struct PermissionGateHandler {
    gate: ConfirmationGate,
}

impl PermissionGateHandler {
    /// Wrap a gate.
    #[must_use]
    pub fn new(gate: ConfirmationGate) -> Self {
        Self { gate }
    }

    /// The wrapped gate.
    #[must_use]
    pub fn gate(&self) -> &ConfirmationGate {
        &self.gate
    }
}

#[async_trait]
impl HookHandler for PermissionGateHandler {
    fn name(&self) -> &str {
        "permission-gate"
    }

    fn events(&self) -> &[HookEventKind] {
        &[HookEventKind::ToolCall]
    }

    async fn handle(&self, event: &HookEvent, ctx: &mut HookContext<'_>) -> HookResult {
        let Some(invocation) = event.invocation() else {
            return HookResult::Continue;
        };

        let outcome = self.gate.evaluate(invocation, ctx.host).await;
        match outcome.block_reason() {
            Some(reason) => {
                info!(tool = %invocation.tool_name, ?outcome, "Blocking tool invocation");
                HookResult::block(reason)
            },
            None => HookResult::Continue,
        }
    }
}
