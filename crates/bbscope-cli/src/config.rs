use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bbscope_types::AuthConfig;
use serde::{Deserialize, Serialize};

/// The AI overlay's settings as they appear in `config.toml`. `provider` is
/// descriptive only today (every endpoint speaks the same chat-completion
/// shape); it exists so a future adapter has somewhere to read it from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSettings {
    #[serde(default)]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default = "default_max_batch")]
    pub max_batch: usize,
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_max_batch() -> usize {
    25
}

fn default_max_concurrency() -> usize {
    4
}

impl From<AiSettings> for bbscope_ai::AiConfig {
    fn from(settings: AiSettings) -> Self {
        bbscope_ai::AiConfig {
            endpoint: settings.endpoint,
            api_key: settings.api_key,
            model: settings.model,
            max_batch: settings.max_batch,
            max_concurrency: settings.max_concurrency,
        }
    }
}

/// `config.toml`: per-platform credentials plus the optional AI overlay.
/// Loaded once at startup and handed down as plain struct parameters
/// (`AuthConfig`, `PollOptions`, `CoordinatorConfig`) so the core crates
/// never see a global.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub hackerone: AuthConfig,
    #[serde(default)]
    pub bugcrowd: AuthConfig,
    #[serde(default)]
    pub intigriti: AuthConfig,
    #[serde(default)]
    pub yeswehack: AuthConfig,
    #[serde(default)]
    pub ai: Option<AiSettings>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("parsing config at {}", path.display()))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating config directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("serializing config")?;
        std::fs::write(path, content)
            .with_context(|| format!("writing config to {}", path.display()))?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(bbscope_core::resolve_data_path(None)?.join("config.toml"))
    }

    /// Credentials for `platform`, or an empty [`AuthConfig`] if it has
    /// never been configured.
    pub fn auth_for(&self, platform: bbscope_types::Platform) -> AuthConfig {
        use bbscope_types::Platform::*;
        match platform {
            HackerOne => self.hackerone.clone(),
            Bugcrowd => self.bugcrowd.clone(),
            Intigriti => self.intigriti.clone(),
            YesWeHack => self.yeswehack.clone(),
            Immunefi => AuthConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trips_through_toml() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.hackerone.username = Some("alice".to_string());
        config.hackerone.token = Some("h1-token".to_string());
        config.ai = Some(AiSettings {
            provider: "openai".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: "sk-test".to_string(),
            endpoint: "https://api.openai.com/v1/chat/completions".to_string(),
            max_batch: 25,
            max_concurrency: 4,
        });

        config.save_to(&path)?;
        let loaded = Config::load_from(&path)?;

        assert_eq!(loaded.hackerone.username, Some("alice".to_string()));
        assert_eq!(loaded.hackerone.token, Some("h1-token".to_string()));
        assert_eq!(loaded.ai.unwrap().model, "gpt-4o-mini");
        Ok(())
    }

    #[test]
    fn load_nonexistent_returns_default() -> Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("missing.toml");
        let config = Config::load_from(&path)?;
        assert!(config.hackerone.username.is_none());
        Ok(())
    }
}
