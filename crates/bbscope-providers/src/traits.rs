use async_trait::async_trait;
use bbscope_types::{AuthConfig, PollOptions, ProgramData};

use crate::Result;

/// Every source adapter exposes exactly these four operations. Concrete
/// adapters stay independently testable by substituting a mock
/// implementation (`bbscope-testing::MockPoller`) in tests.
#[async_trait]
pub trait PlatformPoller: Send + Sync {
    /// Stable name used in config lookups and audit rows (e.g. `"hackerone"`).
    fn name(&self) -> &'static str;

    /// Authenticate against the platform. MUST surface failures as hard
    /// errors — unlike per-program fetch failures, these are not soft.
    async fn authenticate(&self, auth: &AuthConfig) -> Result<()>;

    /// List program handles visible under `opts`' filters.
    async fn list_program_handles(&self, opts: &PollOptions) -> Result<Vec<String>>;

    /// Fetch one program's full scope.
    async fn fetch_program_scope(&self, handle: &str, opts: &PollOptions) -> Result<ProgramData>;
}
