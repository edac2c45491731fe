//! Shared test harness for integration tests.

use std::sync::Arc;

use warden_config::Config;
use warden_core::{HookEvent, Session, ToolInvocation};
use warden_hooks::HookResult;
use warden_runtime::{Dispatch, WardenRuntime};
use warden_skills::FsDocumentStore;
use warden_test::{MockHost, SkillsDir, default_skills_dir, init_test_tracing};

/// A runtime wired to a mock host and a temporary skills directory.
///
/// The skills directory is removed when the harness is dropped.
#[allow(dead_code)]
pub struct WardenHarness {
    /// The assembled runtime.
    pub runtime: WardenRuntime,
    /// The session every event is dispatched in.
    pub session: Session,
    /// The mock host.
    pub host: MockHost,
    /// Guidance documents on disk.
    pub skills: SkillsDir,
}

#[allow(dead_code)]
impl WardenHarness {
    /// Default configuration and the three default documents.
    pub fn new(host: MockHost) -> Self {
        Self::with_parts(&Config::default(), default_skills_dir(), host)
    }

    /// Explicit configuration and documents.
    pub fn with_parts(cfg: &Config, skills: SkillsDir, host: MockHost) -> Self {
        init_test_tracing();
        let store = FsDocumentStore::new(skills.path());
        let runtime = WardenRuntime::with_store(cfg, Arc::new(store)).unwrap();
        let session = runtime.new_session();
        Self {
            runtime,
            session,
            host,
            skills,
        }
    }

    /// Dispatch one event.
    pub async fn send(&mut self, event: HookEvent) -> Dispatch {
        self.runtime
            .dispatch(&event, &mut self.session, &self.host)
            .await
    }

    /// Dispatch a `before_agent_start` event.
    pub async fn prompt(&mut self, text: &str) -> HookResult {
        self.send(HookEvent::BeforeAgentStart {
            prompt: text.to_string(),
        })
        .await
        .result
    }

    /// Dispatch a `tool_call` event.
    pub async fn tool(&mut self, invocation: ToolInvocation) -> HookResult {
        self.send(HookEvent::ToolCall(invocation)).await.result
    }
}
