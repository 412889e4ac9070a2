use async_trait::async_trait;
use bbscope_types::{AuthConfig, PollOptions, ProgramData, RawScopeItem};
use serde::Deserialize;

use crate::traits::PlatformPoller;
use crate::Result;

const BASE_URL: &str = "https://immunefi.com/public-api";

/// Immunefi publishes its bounty listing without authentication; `authenticate`
/// is a no-op that always succeeds, matching the platform's fully public API.
pub struct ImmunefiPoller {
    client: reqwest::Client,
}

impl ImmunefiPoller {
    pub fn new() -> Self {
        ImmunefiPoller {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ImmunefiPoller {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
struct BountiesResponse(Vec<BountyListing>);

#[derive(Debug, Deserialize)]
struct BountyListing {
    project: String,
    #[serde(default)]
    assets: Vec<Asset>,
}

#[derive(Debug, Deserialize)]
struct Asset {
    target: String,
    #[serde(rename = "type")]
    asset_type: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_true")]
    eligible: bool,
}

fn default_true() -> bool {
    true
}

#[async_trait]
impl PlatformPoller for ImmunefiPoller {
    fn name(&self) -> &'static str {
        "immunefi"
    }

    async fn authenticate(&self, _auth: &AuthConfig) -> Result<()> {
        Ok(())
    }

    async fn list_program_handles(&self, _opts: &PollOptions) -> Result<Vec<String>> {
        let response: BountiesResponse = self
            .client
            .get(format!("{BASE_URL}/bounties"))
            .send()
            .await?
            .json()
            .await?;

        Ok(response.0.into_iter().map(|b| b.project).collect())
    }

    async fn fetch_program_scope(&self, handle: &str, _opts: &PollOptions) -> Result<ProgramData> {
        let response: BountiesResponse = self
            .client
            .get(format!("{BASE_URL}/bounties"))
            .query(&[("project", handle)])
            .send()
            .await?
            .json()
            .await?;

        let mut in_scope = Vec::new();
        let mut out_of_scope = Vec::new();

        for listing in response.0 {
            if listing.project != handle {
                continue;
            }
            for asset in listing.assets {
                let raw = RawScopeItem {
                    target: asset.target,
                    description: asset.description,
                    category: asset.asset_type,
                    in_scope: asset.eligible,
                    is_bbp: asset.eligible,
                };
                if asset.eligible {
                    in_scope.push(raw);
                } else {
                    out_of_scope.push(raw);
                }
            }
        }

        Ok(ProgramData {
            url: format!("https://immunefi.com/bug-bounty/{handle}"),
            in_scope,
            out_of_scope,
        })
    }
}
