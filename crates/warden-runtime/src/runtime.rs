//! The assembled handler pipeline.

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};
use warden_approval::{ConfirmationGate, PermissionGateHandler};
use warden_config::ResolvedConfig;
use warden_core::{HookEvent, Host, Session};
use warden_hooks::{DEFAULT_PRIORITY, HookExecution, HookManager, HookResult};
use warden_skills::{DocumentStore, FsDocumentStore, TopicRegistry, skill_handlers};

use crate::config_bridge;
use crate::error::RuntimeResult;

/// Priority of the confirmation gate. A block stops the chain before any
/// injection runs.
pub const GATE_PRIORITY: i32 = 10;

/// Priority of the skills handlers.
pub const SKILLS_PRIORITY: i32 = DEFAULT_PRIORITY;

/// Priority of the status tracker.
pub const STATUS_PRIORITY: i32 = 200;

/// What one dispatch produced.
#[derive(Debug, Clone, Serialize)]
pub struct Dispatch {
    /// Combined result for the host.
    pub result: HookResult,
    /// Per-handler records.
    pub executions: Vec<HookExecution>,
}

/// Handlers built from configuration, ready to receive host events.
#[derive(Debug)]
pub struct WardenRuntime {
    manager: HookManager,
    registry: Option<Arc<TopicRegistry>>,
    gate: Option<ConfirmationGate>,
}

impl WardenRuntime {
    /// Build the pipeline, reading documents from the configured skills
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::RuntimeError`] if a configured pattern is invalid.
    pub fn from_config(resolved: &ResolvedConfig) -> RuntimeResult<Self> {
        let store = FsDocumentStore::new(resolved.skills_dir())
            .with_file_name(resolved.config.skills.document_file.as_str());
        Self::with_store(&resolved.config, Arc::new(store))
    }

    /// Build the pipeline with an explicit document store.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::RuntimeError`] if a configured pattern is invalid.
    pub fn with_store(
        cfg: &warden_config::Config,
        store: Arc<dyn DocumentStore>,
    ) -> RuntimeResult<Self> {
        let mut manager = HookManager::new();

        let gate = if cfg.approval.enabled {
            let gate = config_bridge::to_confirmation_gate(cfg)?;
            manager.register_with_priority(
                Arc::new(PermissionGateHandler::new(gate.clone())),
                GATE_PRIORITY,
            );
            Some(gate)
        } else {
            None
        };

        let registry = if cfg.skills.enabled {
            let registry = Arc::new(config_bridge::to_topic_registry(cfg)?);
            for handler in skill_handlers(Arc::clone(&registry), store) {
                manager.register_with_priority(handler, SKILLS_PRIORITY);
            }
            Some(registry)
        } else {
            None
        };

        if cfg.status.enabled {
            manager.register_with_priority(
                Arc::new(config_bridge::to_status_tracker(cfg)),
                STATUS_PRIORITY,
            );
        }

        info!(stats = ?manager.stats(), "Runtime assembled");
        Ok(Self {
            manager,
            registry,
            gate,
        })
    }

    /// Start a fresh session.
    #[must_use]
    pub fn new_session(&self) -> Session {
        Session::new()
    }

    /// Run the handlers for `event`.
    pub async fn dispatch(&self, event: &HookEvent, session: &mut Session, host: &dyn Host) -> Dispatch {
        let (executions, result) = self.manager.trigger(event, session, host).await;
        debug!(event = %event.kind(), handlers = executions.len(), blocked = result.is_blocking(), "Event dispatched");
        Dispatch { result, executions }
    }

    /// The handler manager.
    #[must_use]
    pub fn manager(&self) -> &HookManager {
        &self.manager
    }

    /// The topic registry, if skills are enabled.
    #[must_use]
    pub fn registry(&self) -> Option<&TopicRegistry> {
        self.registry.as_deref()
    }

    /// The confirmation gate, if approval is enabled.
    #[must_use]
    pub fn gate(&self) -> Option<&ConfirmationGate> {
        self.gate.as_ref()
    }
}
