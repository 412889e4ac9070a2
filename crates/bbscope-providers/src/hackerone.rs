use async_trait::async_trait;
use bbscope_types::{AuthConfig, PollOptions, ProgramData, RawScopeItem};
use serde::Deserialize;

use crate::traits::PlatformPoller;
use crate::{Error, Result};

const BASE_URL: &str = "https://api.hackerone.com/v1";

/// HackerOne's public API. Authenticates with HTTP Basic using the
/// program's API identifier (`username`) and API token (`token`).
///
/// This is a best-effort rendering of the public surface; HackerOne's
/// structured-scope endpoint occasionally omits fields the rest of the
/// scope response carries, so callers should treat missing categories as
/// `"other"` rather than failing the whole program.
pub struct HackerOnePoller {
    client: reqwest::Client,
}

impl HackerOnePoller {
    pub fn new() -> Self {
        HackerOnePoller {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HackerOnePoller {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct ProgramsResponse {
    data: Vec<ProgramSummary>,
}

#[derive(Debug, Deserialize)]
struct ProgramSummary {
    attributes: ProgramAttributes,
}

#[derive(Debug, Deserialize)]
struct ProgramAttributes {
    handle: String,
}

#[derive(Debug, Deserialize)]
struct ScopeResponse {
    data: Vec<ScopeDatum>,
}

#[derive(Debug, Deserialize)]
struct ScopeDatum {
    attributes: ScopeAttributes,
}

#[derive(Debug, Deserialize)]
struct ScopeAttributes {
    asset_identifier: String,
    asset_type: String,
    #[serde(default)]
    instruction: Option<String>,
    eligible_for_submission: bool,
    #[serde(default)]
    eligible_for_bounty: bool,
}

#[async_trait]
impl PlatformPoller for HackerOnePoller {
    fn name(&self) -> &'static str {
        "hackerone"
    }

    async fn authenticate(&self, auth: &AuthConfig) -> Result<()> {
        let username = auth
            .username
            .as_deref()
            .ok_or_else(|| Error::Authentication("missing hackerone.username".to_string()))?;
        let token = auth
            .token
            .as_deref()
            .ok_or_else(|| Error::Authentication("missing hackerone.token".to_string()))?;

        let response = self
            .client
            .get(format!("{BASE_URL}/me"))
            .basic_auth(username, Some(token))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Authentication(format!(
                "hackerone rejected credentials: {}",
                response.status()
            )));
        }
        Ok(())
    }

    async fn list_program_handles(&self, opts: &PollOptions) -> Result<Vec<String>> {
        let response: ProgramsResponse = self
            .client
            .get(format!("{BASE_URL}/hackers/programs"))
            .send()
            .await?
            .json()
            .await?;

        let handles = response
            .data
            .into_iter()
            .map(|p| p.attributes.handle)
            .filter(|_| !opts.private_only)
            .collect();
        Ok(handles)
    }

    async fn fetch_program_scope(&self, handle: &str, _opts: &PollOptions) -> Result<ProgramData> {
        let response: ScopeResponse = self
            .client
            .get(format!(
                "{BASE_URL}/hackers/programs/{handle}/structured_scopes"
            ))
            .send()
            .await?
            .json()
            .await?;

        let mut in_scope = Vec::new();
        let mut out_of_scope = Vec::new();

        for item in response.data {
            let attrs = item.attributes;
            let raw = RawScopeItem {
                target: attrs.asset_identifier,
                description: attrs.instruction,
                category: attrs.asset_type,
                in_scope: attrs.eligible_for_submission,
                is_bbp: attrs.eligible_for_bounty,
            };
            if raw.in_scope {
                in_scope.push(raw);
            } else {
                out_of_scope.push(raw);
            }
        }

        Ok(ProgramData {
            url: format!("https://hackerone.com/{handle}"),
            in_scope,
            out_of_scope,
        })
    }
}
