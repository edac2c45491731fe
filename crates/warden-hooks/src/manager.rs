//! Hook manager - ordered registration and dispatch.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use warden_core::{HookEvent, HookEventKind, Host, Session};

use crate::handler::HookHandler;
use crate::result::{HookContext, HookExecution, HookResult};

/// Default handler priority.
pub const DEFAULT_PRIORITY: i32 = 100;

struct Registration {
    priority: i32,
    handler: Arc<dyn HookHandler>,
}

/// Runs the handlers registered for each event kind.
pub struct HookManager {
    by_event: HashMap<HookEventKind, Vec<Registration>>,
    handler_count: usize,
}

impl Default for HookManager {
    fn default() -> Self {
        Self::new()
    }
}

impl HookManager {
    /// Create an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_event: HashMap::new(),
            handler_count: 0,
        }
    }

    /// Register a handler with the default priority.
    pub fn register(&mut self, handler: Arc<dyn HookHandler>) {
        self.register_with_priority(handler, DEFAULT_PRIORITY);
    }

    /// Register a handler for every event kind it subscribes to.
    ///
    /// Lower priorities run first; equal priorities keep registration order.
    pub fn register_with_priority(&mut self, handler: Arc<dyn HookHandler>, priority: i32) {
        info!(
            handler = handler.name(),
            events = ?handler.events(),
            priority,
            "Registering hook handler"
        );

        for kind in handler.events() {
            let list = self.by_event.entry(*kind).or_default();
            list.push(Registration {
                priority,
                handler: Arc::clone(&handler),
            });
            // Stable sort keeps registration order among equal priorities.
            list.sort_by_key(|r| r.priority);
        }
        self.handler_count = self.handler_count.saturating_add(1);
    }

    /// Names of the handlers for an event kind, in dispatch order.
    #[must_use]
    pub fn handlers_for(&self, kind: HookEventKind) -> Vec<&str> {
        self.by_event
            .get(&kind)
            .map(|list| list.iter().map(|r| r.handler.name()).collect())
            .unwrap_or_default()
    }

    /// Dispatch an event to its handlers.
    ///
    /// Returns the execution records and the combined result.
    pub async fn trigger(
        &self,
        event: &HookEvent,
        session: &mut Session,
        host: &dyn Host,
    ) -> (Vec<HookExecution>, HookResult) {
        let kind = event.kind();
        let Some(handlers) = self.by_event.get(&kind).filter(|l| !l.is_empty()) else {
            debug!(event = %kind, "No handlers registered for event");
            return (Vec::new(), HookResult::Continue);
        };

        debug!(event = %kind, handler_count = handlers.len(), "Dispatching event");

        let mut ctx = HookContext::new(kind, session, host);
        let mut executions = Vec::with_capacity(handlers.len());

        for registration in handlers {
            let handler = &registration.handler;
            let started_at = Utc::now();
            let result = handler.handle(event, &mut ctx).await;

            #[allow(clippy::cast_sign_loss)]
            let duration_ms = Utc::now()
                .signed_duration_since(started_at)
                .num_milliseconds()
                .max(0) as u64;

            let blocked = result.is_blocking();
            executions.push(HookExecution {
                handler: handler.name().to_string(),
                invocation_id: ctx.invocation_id,
                started_at,
                duration_ms,
                result,
            });

            if blocked {
                info!(
                    event = %kind,
                    handler = handler.name(),
                    "Handler returned Block result, stopping chain"
                );
                break;
            }
        }

        let combined = Self::combine_results(&executions);
        (executions, combined)
    }

    /// Dispatch an event and return only the combined result.
    pub async fn trigger_simple(
        &self,
        event: &HookEvent,
        session: &mut Session,
        host: &dyn Host,
    ) -> HookResult {
        let (_, result) = self.trigger(event, session, host).await;
        result
    }

    /// Combine handler results into a single result.
    ///
    /// Rules:
    /// - Any Block result → the first Block
    /// - Instruction appends are concatenated in order
    /// - Otherwise → Continue
    #[must_use]
    pub fn combine_results(executions: &[HookExecution]) -> HookResult {
        let mut appended = String::new();

        for execution in executions {
            match &execution.result {
                HookResult::Block { reason } => {
                    return HookResult::Block {
                        reason: reason.clone(),
                    };
                },
                HookResult::AppendInstructions { text } => appended.push_str(text),
                HookResult::Continue => {},
            }
        }

        if appended.is_empty() {
            HookResult::Continue
        } else {
            HookResult::AppendInstructions { text: appended }
        }
    }

    /// Get statistics about registered handlers.
    #[must_use]
    pub fn stats(&self) -> HookStats {
        HookStats {
            handlers: self.handler_count,
            events_with_handlers: self.by_event.values().filter(|l| !l.is_empty()).count(),
        }
    }
}

impl std::fmt::Debug for HookManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookManager")
            .field("stats", &self.stats())
            .finish_non_exhaustive()
    }
}

/// Statistics about registered handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HookStats {
    /// Number of registered handlers.
    pub handlers: usize,
    /// Number of event kinds with at least one handler.
    pub events_with_handlers: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use warden_core::ToolInvocation;
    use warden_test::MockHost;

    /// Returns a fixed result and records the order it ran in.
    struct FixedHandler {
        name: &'static str,
        events: Vec<HookEventKind>,
        result: HookResult,
        log: Arc<Mutex<Vec<&'static str>>>,
    }

    impl FixedHandler {
        fn new(
            name: &'static str,
            result: HookResult,
            log: &Arc<Mutex<Vec<&'static str>>>,
        ) -> Arc<Self> {
            Arc::new(Self {
                name,
                events: vec![HookEventKind::ToolCall, HookEventKind::BeforeAgentStart],
                result,
                log: Arc::clone(log),
            })
        }
    }

    #[async_trait]
    impl HookHandler for FixedHandler {
        fn name(&self) -> &str {
            self.name
        }

        fn events(&self) -> &[HookEventKind] {
            &self.events
        }

        async fn handle(&self, _event: &HookEvent, _ctx: &mut HookContext<'_>) -> HookResult {
            self.log.lock().unwrap().push(self.name);
            self.result.clone()
        }
    }

    fn tool_call() -> HookEvent {
        HookEvent::ToolCall(ToolInvocation::new("bash").with_arg("command", "ls"))
    }

    #[tokio::test]
    async fn test_no_handlers_continues() {
        let manager = HookManager::new();
        let host = MockHost::new();
        let mut session = Session::new();

        let (executions, result) = manager.trigger(&tool_call(), &mut session, &host).await;
        assert!(executions.is_empty());
        assert_eq!(result, HookResult::Continue);
    }

    #[tokio::test]
    async fn test_priority_then_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = HookManager::new();
        manager.register(FixedHandler::new("b", HookResult::Continue, &log));
        manager.register(FixedHandler::new("c", HookResult::Continue, &log));
        manager.register_with_priority(FixedHandler::new("a", HookResult::Continue, &log), 10);

        assert_eq!(
            manager.handlers_for(HookEventKind::ToolCall),
            vec!["a", "b", "c"]
        );

        let host = MockHost::new();
        let mut session = Session::new();
        manager.trigger(&tool_call(), &mut session, &host).await;
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_first_block_wins_and_stops_chain() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = HookManager::new();
        manager.register(FixedHandler::new("gate", HookResult::block("Timed out"), &log));
        manager.register(FixedHandler::new("late", HookResult::block("other"), &log));

        let host = MockHost::new();
        let mut session = Session::new();
        let (executions, result) = manager.trigger(&tool_call(), &mut session, &host).await;

        assert_eq!(executions.len(), 1);
        assert_eq!(result, HookResult::block("Timed out"));
        assert_eq!(*log.lock().unwrap(), vec!["gate"]);
    }

    #[tokio::test]
    async fn test_appends_are_concatenated() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = HookManager::new();
        manager.register(FixedHandler::new("one", HookResult::append("A"), &log));
        manager.register(FixedHandler::new("none", HookResult::Continue, &log));
        manager.register(FixedHandler::new("two", HookResult::append("B"), &log));

        let host = MockHost::new();
        let mut session = Session::new();
        let event = HookEvent::BeforeAgentStart {
            prompt: "hello".to_string(),
        };
        let result = manager.trigger_simple(&event, &mut session, &host).await;
        assert_eq!(result, HookResult::append("AB"));
    }

    #[tokio::test]
    async fn test_unsubscribed_event_is_ignored() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = HookManager::new();
        manager.register(FixedHandler::new("one", HookResult::block("x"), &log));

        let host = MockHost::new();
        let mut session = Session::new();
        let result = manager
            .trigger_simple(&HookEvent::TurnEnd, &mut session, &host)
            .await;
        assert_eq!(result, HookResult::Continue);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_stats() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut manager = HookManager::new();
        manager.register(FixedHandler::new("one", HookResult::Continue, &log));
        let stats = manager.stats();
        assert_eq!(stats.handlers, 1);
        assert_eq!(stats.events_with_handlers, 2);
        assert!(format!("{manager:?}").contains("HookManager"));
    }
}
