//! Hook handlers that inject guidance documents.
//!
//! Three handlers share one [`TopicRegistry`] and one [`DocumentStore`]:
//!
//! - [`SessionResetHandler`] clears the session's injection tracker.
//! - [`PromptInjectionHandler`] scans the prompt and appends the matching
//!   documents to this turn's instructions.
//! - [`PathInjectionHandler`] scans a tool invocation's `path` argument and
//!   schedules the matching documents as hidden next-turn messages.
//!
//! A topic is committed to the tracker only after its document loaded.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use warden_core::{HookEvent, HookEventKind, NotifyLevel, SessionMessage};
use warden_hooks::{HookContext, HookHandler, HookResult};

use crate::registry::TopicRegistry;
use crate::store::DocumentStore;
use crate::topic::Topic;

/// Custom type of path-triggered messages.
pub const AUTO_SKILL_MESSAGE_TYPE: &str = "auto-skill";

/// Separator between documents appended in the same turn.
pub const DOCUMENT_SEPARATOR: &str = "\n\n---\n\n";

/// Clears delivered topics when a session starts.
#[derive(Debug, Default)]
pub struct SessionResetHandler;

#[async_trait]
impl HookHandler for SessionResetHandler {
    fn name(&self) -> &str {
        "skills-session-reset"
    }

    fn events(&self) -> &[HookEventKind] {
        &[HookEventKind::SessionStart]
    }

    async fn handle(&self, _event: &HookEvent, ctx: &mut HookContext<'_>) -> HookResult {
        let cleared = ctx.session.injections.len();
        ctx.session.injections.reset();
        debug!(session = %ctx.session.id, cleared, "Reset injection tracker");
        HookResult::Continue
    }
}

/// Appends guidance for topics detected in the prompt.
pub struct PromptInjectionHandler {
    registry: Arc<TopicRegistry>,
    store: Arc<dyn DocumentStore>,
}

impl PromptInjectionHandler {
    /// Create the handler.
    #[must_use]
    pub fn new(registry: Arc<TopicRegistry>, store: Arc<dyn DocumentStore>) -> Self {
        Self { registry, store }
    }
}

impl std::fmt::Debug for PromptInjectionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptInjectionHandler")
            .field("topics", &self.registry.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl HookHandler for PromptInjectionHandler {
    fn name(&self) -> &str {
        "skills-prompt"
    }

    fn events(&self) -> &[HookEventKind] {
        &[HookEventKind::BeforeAgentStart]
    }

    async fn handle(&self, event: &HookEvent, ctx: &mut HookContext<'_>) -> HookResult {
        let HookEvent::BeforeAgentStart { prompt } = event else {
            return HookResult::Continue;
        };

        let fired = self
            .registry
            .detect(prompt, ctx.session.injections.delivered());
        if fired.is_empty() {
            return HookResult::Continue;
        }

        let mut contents = Vec::with_capacity(fired.len());
        for id in &fired {
            let Some(topic) = self.registry.get(id.as_str()) else {
                continue;
            };
            if let Some(content) = self.store.load(topic.document()).await {
                ctx.session.injections.mark_delivered(id.as_str());
                info!(topic = %id, document = %topic.document(), "Injecting guidance from prompt");
                contents.push(content);
            }
        }

        if contents.is_empty() {
            HookResult::Continue
        } else {
            HookResult::append(format!("\n\n{}", contents.join(DOCUMENT_SEPARATOR)))
        }
    }
}

/// Schedules guidance for topics detected in a tool's `path` argument.
pub struct PathInjectionHandler {
    registry: Arc<TopicRegistry>,
    store: Arc<dyn DocumentStore>,
}

impl PathInjectionHandler {
    /// Create the handler.
    #[must_use]
    pub fn new(registry: Arc<TopicRegistry>, store: Arc<dyn DocumentStore>) -> Self {
        Self { registry, store }
    }

    fn message_for(topic: &Topic, content: &str) -> SessionMessage {
        SessionMessage::hidden(
            AUTO_SKILL_MESSAGE_TYPE,
            format!("[Auto-loaded {} guidelines]\n\n{content}", topic.document()),
        )
        .with_topic(topic.id().as_str())
    }
}

impl std::fmt::Debug for PathInjectionHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathInjectionHandler")
            .field("topics", &self.registry.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl HookHandler for PathInjectionHandler {
    fn name(&self) -> &str {
        "skills-path"
    }

    fn events(&self) -> &[HookEventKind] {
        &[HookEventKind::ToolCall]
    }

    async fn handle(&self, event: &HookEvent, ctx: &mut HookContext<'_>) -> HookResult {
        let Some(path) = event.invocation().and_then(|inv| inv.path()) else {
            return HookResult::Continue;
        };

        let fired = self.registry.detect(path, ctx.session.injections.delivered());
        for id in &fired {
            let Some(topic) = self.registry.get(id.as_str()) else {
                continue;
            };
            let Some(content) = self.store.load(topic.document()).await else {
                continue;
            };

            ctx.session.injections.mark_delivered(id.as_str());
            info!(topic = %id, document = %topic.document(), path, "Injecting guidance from tool path");
            ctx.host.send_message(Self::message_for(topic, &content));
            ctx.host
                .notify(&format!("Loaded {} skill", topic.document()), NotifyLevel::Info);
        }

        HookResult::Continue
    }
}

/// The three skills handlers, sharing one registry and store.
#[must_use]
pub fn skill_handlers(
    registry: Arc<TopicRegistry>,
    store: Arc<dyn DocumentStore>,
) -> Vec<Arc<dyn HookHandler>> {
    vec![
        Arc::new(SessionResetHandler),
        Arc::new(PromptInjectionHandler::new(
            Arc::clone(&registry),
            Arc::clone(&store),
        )),
        Arc::new(PathInjectionHandler::new(registry, store)),
    ]
}
