use std::sync::Arc;

use bbscope_types::{Platform, ScopeEntry, TargetVariant};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;

use crate::config::AiConfig;
use crate::Result;

/// Calls an OpenAI-compatible normalization endpoint in batches, bounded by
/// a semaphore so a slow provider can't pile up unbounded concurrent
/// requests. Every failure is swallowed at the call site (see
/// [`crate::enhance_program`]) — this type only knows how to talk to the
/// wire, not how to degrade.
pub struct AiClient {
    http: reqwest::Client,
    config: AiConfig,
    limiter: Arc<Semaphore>,
}

#[derive(Debug, Serialize)]
struct NormalizeRequest<'a> {
    program_url: &'a str,
    platform: &'a str,
    handle: &'a str,
    model: &'a str,
    items: Vec<RequestItem<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestItem<'a> {
    target: &'a str,
    category: &'a str,
    description: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct NormalizeResponse {
    #[serde(default)]
    items: Vec<ResponseItem>,
}

#[derive(Debug, Deserialize)]
struct ResponseItem {
    target: String,
    #[serde(default)]
    variants: Vec<ResponseVariant>,
}

#[derive(Debug, Deserialize)]
struct ResponseVariant {
    value: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    in_scope: Option<bool>,
}

impl AiClient {
    pub fn new(config: AiConfig) -> Self {
        let limiter = Arc::new(Semaphore::new(config.max_concurrency.max(1)));
        AiClient {
            http: reqwest::Client::new(),
            config,
            limiter,
        }
    }

    pub fn max_batch(&self) -> usize {
        self.config.max_batch.max(1)
    }

    /// Sends one batch and returns variants keyed by the batch's own index
    /// order. Items the provider didn't mention come back with an empty
    /// variant list.
    pub async fn normalize_batch(
        &self,
        program_url: &str,
        platform: Platform,
        handle: &str,
        batch: &[ScopeEntry],
    ) -> Result<Vec<Vec<TargetVariant>>> {
        let _permit = self.limiter.acquire().await.expect("semaphore not closed");

        let request = NormalizeRequest {
            program_url,
            platform: platform.as_str(),
            handle,
            model: &self.config.model,
            items: batch
                .iter()
                .map(|item| RequestItem {
                    target: &item.target,
                    category: item.category.as_str(),
                    description: item.description.as_deref(),
                })
                .collect(),
        };

        let response: NormalizeResponse = self
            .http
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let mut by_target: std::collections::HashMap<String, Vec<ResponseVariant>> =
            std::collections::HashMap::new();
        for item in response.items {
            by_target.insert(item.target, item.variants);
        }

        Ok(batch
            .iter()
            .map(|item| {
                by_target
                    .remove(&item.target)
                    .unwrap_or_default()
                    .into_iter()
                    .map(|v| TargetVariant {
                        value: v.value,
                        category: v.category,
                        in_scope: v.in_scope,
                    })
                    .collect()
            })
            .collect())
    }
}
