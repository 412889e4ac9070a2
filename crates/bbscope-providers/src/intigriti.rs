use async_trait::async_trait;
use bbscope_types::{AuthConfig, PollOptions, ProgramData, RawScopeItem};
use serde::Deserialize;

use crate::traits::PlatformPoller;
use crate::{Error, Result};

const BASE_URL: &str = "https://api.intigriti.com/core/researcher";

/// Intigriti's researcher API, bearer-token authenticated.
pub struct IntigritiPoller {
    client: reqwest::Client,
}

impl IntigritiPoller {
    pub fn new() -> Self {
        IntigritiPoller {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for IntigritiPoller {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct ProgramsResponse {
    records: Vec<ProgramSummary>,
}

#[derive(Debug, Deserialize)]
struct ProgramSummary {
    handle: String,
}

#[derive(Debug, Deserialize)]
struct ProgramDetail {
    domains: Vec<DomainGroup>,
}

#[derive(Debug, Deserialize)]
struct DomainGroup {
    #[serde(rename = "type")]
    type_: DomainType,
    content: Vec<DomainEntry>,
}

#[derive(Debug, Deserialize)]
struct DomainType {
    value: String,
}

#[derive(Debug, Deserialize)]
struct DomainEntry {
    endpoint: String,
    #[serde(default)]
    description: Option<String>,
    tier: DomainTier,
}

#[derive(Debug, Deserialize)]
struct DomainTier {
    value: String,
}

#[async_trait]
impl PlatformPoller for IntigritiPoller {
    fn name(&self) -> &'static str {
        "intigriti"
    }

    async fn authenticate(&self, auth: &AuthConfig) -> Result<()> {
        let token = auth
            .token
            .as_deref()
            .ok_or_else(|| Error::Authentication("missing intigriti.token".to_string()))?;

        let response = self
            .client
            .get(format!("{BASE_URL}/programs"))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Authentication(format!(
                "intigriti rejected token: {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn list_program_handles(&self, _opts: &PollOptions) -> Result<Vec<String>> {
        let response: ProgramsResponse = self
            .client
            .get(format!("{BASE_URL}/programs"))
            .send()
            .await?
            .json()
            .await?;

        Ok(response.records.into_iter().map(|p| p.handle).collect())
    }

    async fn fetch_program_scope(&self, handle: &str, _opts: &PollOptions) -> Result<ProgramData> {
        let detail: ProgramDetail = self
            .client
            .get(format!("{BASE_URL}/programs/{handle}"))
            .send()
            .await?
            .json()
            .await?;

        let mut in_scope = Vec::new();
        let mut out_of_scope = Vec::new();

        for group in detail.domains {
            for entry in group.content {
                let eligible = entry.tier.value.to_lowercase() != "out of scope";
                let raw = RawScopeItem {
                    target: entry.endpoint,
                    description: entry.description,
                    category: group.type_.value.clone(),
                    in_scope: eligible,
                    is_bbp: eligible,
                };
                if eligible {
                    in_scope.push(raw);
                } else {
                    out_of_scope.push(raw);
                }
            }
        }

        Ok(ProgramData {
            url: format!("https://app.intigriti.com/researcher/programs/{handle}"),
            in_scope,
            out_of_scope,
        })
    }
}
