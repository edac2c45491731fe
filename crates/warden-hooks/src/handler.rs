//! The handler interface.

use async_trait::async_trait;
use warden_core::{HookEvent, HookEventKind};

use crate::result::{HookContext, HookResult};

/// A unit of behaviour attached to one or more event kinds.
///
/// Handlers never fail: anything that goes wrong is logged and degrades to
/// [`HookResult::Continue`].
#[async_trait]
pub trait HookHandler: Send + Sync {
    /// Handler name, used in logs and execution records.
    fn name(&self) -> &str;

    /// Event kinds this handler subscribes to.
    fn events(&self) -> &[HookEventKind];

    /// Handle one event.
    async fn handle(&self, event: &HookEvent, ctx: &mut HookContext<'_>) -> HookResult;
}
