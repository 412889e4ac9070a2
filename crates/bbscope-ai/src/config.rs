use serde::{Deserialize, Serialize};

/// Wiring for the optional AI overlay pass. `endpoint`/`api_key` point at
/// whatever OpenAI-compatible chat endpoint the user configured;
/// `max_batch`/`max_concurrency` bound how aggressively we call it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    pub endpoint: String,
    pub api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
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

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            endpoint: String::new(),
            api_key: String::new(),
            model: default_model(),
            max_batch: default_max_batch(),
            max_concurrency: default_max_concurrency(),
        }
    }
}
