//! Mock implementations of the host capabilities.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use warden_core::{
    ExecOutput, Host, HostError, HostResult, InteractiveSurface, NotifyLevel, SessionMessage,
};

/// How the mock surface answers one prompt.
#[derive(Debug, Clone)]
pub enum SurfaceResponse {
    /// Pick `choice` after `after` has elapsed, unless cancelled first.
    Choose {
        /// The choice to return (`None` dismisses the prompt).
        choice: Option<String>,
        /// Simulated think time.
        after: Duration,
    },
    /// Wait until cancelled, then resolve with `None`.
    WaitForCancel,
    /// Never resolve, even when cancelled.
    Hang,
}

impl SurfaceResponse {
    /// Pick `choice` immediately.
    #[must_use]
    pub fn choose(choice: impl Into<String>) -> Self {
        Self::Choose {
            choice: Some(choice.into()),
            after: Duration::ZERO,
        }
    }

    /// Pick `choice` after a delay.
    #[must_use]
    pub fn choose_after(choice: impl Into<String>, after: Duration) -> Self {
        Self::Choose {
            choice: Some(choice.into()),
            after,
        }
    }

    /// Dismiss the prompt without choosing.
    #[must_use]
    pub fn dismiss() -> Self {
        Self::Choose {
            choice: None,
            after: Duration::ZERO,
        }
    }
}

/// A prompt the mock surface was shown.
#[derive(Debug, Clone)]
pub struct RecordedPrompt {
    /// Prompt text.
    pub prompt: String,
    /// Offered choices.
    pub choices: Vec<String>,
    /// The cancellation signal handed to the surface.
    pub signal: CancellationToken,
}

/// Mock interactive surface with scripted answers.
///
/// Uses `std::sync::Mutex` so builder methods work without a runtime.
#[derive(Debug, Clone)]
pub struct MockSurface {
    responses: Arc<Mutex<VecDeque<SurfaceResponse>>>,
    prompts: Arc<Mutex<Vec<RecordedPrompt>>>,
}

impl MockSurface {
    /// Create a surface that waits for cancellation on every prompt.
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue a response for the next prompt.
    #[must_use]
    pub fn with_response(self, response: SurfaceResponse) -> Self {
        if let Ok(mut guard) = self.responses.lock() {
            guard.push_back(response);
        }
        self
    }

    /// Prompts shown so far.
    #[must_use]
    pub fn prompts(&self) -> Vec<RecordedPrompt> {
        self.prompts.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Number of prompts shown so far.
    #[must_use]
    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().map(|g| g.len()).unwrap_or_default()
    }
}

impl Default for MockSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InteractiveSurface for MockSurface {
    async fn select(
        &self,
        prompt: &str,
        choices: &[&str],
        signal: CancellationToken,
    ) -> Option<String> {
        if let Ok(mut guard) = self.prompts.lock() {
            guard.push(RecordedPrompt {
                prompt: prompt.to_string(),
                choices: choices.iter().map(ToString::to_string).collect(),
                signal: signal.clone(),
            });
        }

        let response = self
            .responses
            .lock()
            .ok()
            .and_then(|mut g| g.pop_front())
            .unwrap_or(SurfaceResponse::WaitForCancel);

        match response {
            SurfaceResponse::Choose { choice, after } => {
                tokio::select! {
                    () = tokio::time::sleep(after) => choice,
                    () = signal.cancelled() => None,
                }
            },
            SurfaceResponse::WaitForCancel => {
                signal.cancelled().await;
                None
            },
            SurfaceResponse::Hang => std::future::pending().await,
        }
    }
}

/// Mock host that records everything handlers ask of it.
#[derive(Debug, Clone)]
pub struct MockHost {
    messages: Arc<Mutex<Vec<SessionMessage>>>,
    notifications: Arc<Mutex<Vec<(String, NotifyLevel)>>>,
    exec_calls: Arc<Mutex<Vec<(String, Vec<String>)>>>,
    exec_results: Arc<Mutex<VecDeque<Result<String, String>>>>,
    surface: Option<MockSurface>,
    working_dir: Option<PathBuf>,
}

impl MockHost {
    /// Create a host with no interactive surface.
    ///
    /// `exec` fails unless results are queued.
    #[must_use]
    pub fn new() -> Self {
        Self {
            messages: Arc::new(Mutex::new(Vec::new())),
            notifications: Arc::new(Mutex::new(Vec::new())),
            exec_calls: Arc::new(Mutex::new(Vec::new())),
            exec_results: Arc::new(Mutex::new(VecDeque::new())),
            surface: None,
            working_dir: None,
        }
    }

    /// Attach an interactive surface.
    #[must_use]
    pub fn with_surface(mut self, surface: MockSurface) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Set the reported working directory.
    #[must_use]
    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Queue a successful `exec` result with the given stdout.
    #[must_use]
    pub fn with_exec_stdout(self, stdout: impl Into<String>) -> Self {
        self.queue_exec(Ok(stdout.into()));
        self
    }

    /// Queue a failing `exec` result.
    #[must_use]
    pub fn with_exec_failure(self, stderr: impl Into<String>) -> Self {
        self.queue_exec(Err(stderr.into()));
        self
    }

    /// Queue an `exec` result.
    pub fn queue_exec(&self, result: Result<String, String>) {
        if let Ok(mut guard) = self.exec_results.lock() {
            guard.push_back(result);
        }
    }

    /// The attached surface, if any.
    #[must_use]
    pub fn surface(&self) -> Option<&MockSurface> {
        self.surface.as_ref()
    }

    /// Messages scheduled so far.
    #[must_use]
    pub fn messages(&self) -> Vec<SessionMessage> {
        self.messages.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Notifications shown so far.
    #[must_use]
    pub fn notifications(&self) -> Vec<(String, NotifyLevel)> {
        self.notifications
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }

    /// Processes executed so far.
    #[must_use]
    pub fn exec_calls(&self) -> Vec<(String, Vec<String>)> {
        self.exec_calls.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Clear captured messages and notifications.
    pub fn clear(&self) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.clear();
        }
        if let Ok(mut guard) = self.notifications.lock() {
            guard.clear();
        }
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Host for MockHost {
    fn send_message(&self, message: SessionMessage) {
        if let Ok(mut guard) = self.messages.lock() {
            guard.push(message);
        }
    }

    fn notify(&self, message: &str, level: NotifyLevel) {
        if let Ok(mut guard) = self.notifications.lock() {
            guard.push((message.to_string(), level));
        }
    }

    async fn exec(
        &self,
        program: &str,
        args: &[&str],
        _timeout: Duration,
    ) -> HostResult<ExecOutput> {
        if let Ok(mut guard) = self.exec_calls.lock() {
            guard.push((
                program.to_string(),
                args.iter().map(ToString::to_string).collect(),
            ));
        }

        let next = self.exec_results.lock().ok().and_then(|mut g| g.pop_front());
        match next {
            Some(Ok(stdout)) => Ok(ExecOutput {
                stdout,
                stderr: String::new(),
            }),
            Some(Err(stderr)) => Err(HostError::NonZeroExit {
                program: program.to_string(),
                code: 1,
                stderr,
            }),
            None => Err(HostError::Unavailable(format!("no result queued for {program}"))),
        }
    }

    fn interactive_surface(&self) -> Option<&dyn InteractiveSurface> {
        self.surface
            .as_ref()
            .map(|s| s as &dyn InteractiveSurface)
    }

    fn working_dir(&self) -> Option<PathBuf> {
        self.working_dir.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_surface_scripted_choice() {
        let surface = MockSurface::new().with_response(SurfaceResponse::choose("Yes"));
        let choice = surface
            .select("Allow?", &["Yes", "No"], CancellationToken::new())
            .await;
        assert_eq!(choice.as_deref(), Some("Yes"));
        assert_eq!(surface.prompt_count(), 1);
        assert_eq!(surface.prompts()[0].choices, vec!["Yes", "No"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_surface_observes_cancellation() {
        let surface = MockSurface::new();
        let token = CancellationToken::new();
        token.cancel();
        let choice = surface.select("Allow?", &["Yes", "No"], token).await;
        assert!(choice.is_none());
    }

    #[tokio::test]
    async fn test_host_records_side_effects() {
        let host = MockHost::new().with_exec_stdout("main\n");
        host.send_message(SessionMessage::hidden("auto-skill", "body"));
        host.notify("Loaded skill", NotifyLevel::Info);

        let out = host
            .exec("git", &["branch", "--show-current"], Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(out.stdout, "main\n");
        assert!(host.exec("git", &[], Duration::from_secs(1)).await.is_err());

        assert_eq!(host.messages().len(), 1);
        assert_eq!(host.notifications()[0].1, NotifyLevel::Info);
        assert_eq!(host.exec_calls().len(), 2);
        assert!(host.interactive_surface().is_none());
    }
}
