use std::collections::HashMap;

use bbscope_types::{AuthConfig, Platform, PollOptions};

/// Global flags threaded through one polling cycle: how many programs to
/// fetch concurrently per platform, and whether the AI overlay runs at all.
#[derive(Debug, Clone)]
pub struct CoordinatorConfig {
    pub concurrency: usize,
    pub ai: Option<bbscope_ai::AiConfig>,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        CoordinatorConfig {
            concurrency: 5,
            ai: None,
        }
    }
}

/// Per-platform credentials and filter options, keyed the way a loaded
/// `config.toml` would hand them to the coordinator.
#[derive(Debug, Clone, Default)]
pub struct PlatformSettings {
    pub auth: HashMap<Platform, AuthConfig>,
    pub options: HashMap<Platform, PollOptions>,
}

impl PlatformSettings {
    pub fn auth_for(&self, platform: Platform) -> AuthConfig {
        self.auth.get(&platform).cloned().unwrap_or_default()
    }

    pub fn options_for(&self, platform: Platform) -> PollOptions {
        self.options.get(&platform).cloned().unwrap_or_default()
    }
}
