use std::sync::Mutex;

use async_trait::async_trait;
use bbscope_providers::{Error, PlatformPoller, Result};
use bbscope_types::{AuthConfig, PollOptions, ProgramData};

/// A scripted [`PlatformPoller`]: returns canned responses and records every
/// call it received, so a coordinator test can assert on what it was asked
/// to do without touching the network.
pub struct MockPoller {
    name: &'static str,
    auth_failure: Option<String>,
    handles: Vec<String>,
    programs: Vec<ProgramData>,
    calls: Mutex<Vec<String>>,
}

impl MockPoller {
    pub fn new(name: &'static str) -> Self {
        MockPoller {
            name,
            auth_failure: None,
            handles: Vec::new(),
            programs: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_handles(mut self, handles: Vec<String>) -> Self {
        self.handles = handles;
        self
    }

    pub fn with_program(mut self, program: ProgramData) -> Self {
        self.programs.push(program);
        self
    }

    pub fn failing_auth(mut self, message: impl Into<String>) -> Self {
        self.auth_failure = Some(message.into());
        self
    }

    /// Calls recorded so far, in order (`"authenticate"`, `"list_program_handles"`,
    /// `"fetch_program_scope:<handle>"`).
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("mock mutex poisoned").clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().expect("mock mutex poisoned").push(call.into());
    }
}

#[async_trait]
impl PlatformPoller for MockPoller {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn authenticate(&self, _auth: &AuthConfig) -> Result<()> {
        self.record("authenticate");
        match &self.auth_failure {
            Some(msg) => Err(Error::Authentication(msg.clone())),
            None => Ok(()),
        }
    }

    async fn list_program_handles(&self, _opts: &PollOptions) -> Result<Vec<String>> {
        self.record("list_program_handles");
        Ok(self.handles.clone())
    }

    async fn fetch_program_scope(&self, handle: &str, _opts: &PollOptions) -> Result<ProgramData> {
        self.record(format!("fetch_program_scope:{handle}"));
        self.programs
            .iter()
            .find(|p| p.url.contains(handle))
            .cloned()
            .ok_or_else(|| Error::Decode(format!("no fixture program data for handle {handle}")))
    }
}
