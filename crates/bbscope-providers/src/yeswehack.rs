use async_trait::async_trait;
use bbscope_types::{AuthConfig, PollOptions, ProgramData, RawScopeItem};
use serde::Deserialize;

use crate::traits::PlatformPoller;
use crate::{Error, Result};

const BASE_URL: &str = "https://api.yeswehack.com";

/// YesWeHack's public API. Login exchanges `email`/`password` (plus a
/// TOTP derived from `otp_secret` when 2FA is enforced) for a short-lived
/// bearer token; this adapter performs that exchange on every
/// `authenticate` call rather than caching the token across polls.
pub struct YesWeHackPoller {
    client: reqwest::Client,
}

impl YesWeHackPoller {
    pub fn new() -> Self {
        YesWeHackPoller {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for YesWeHackPoller {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, serde::Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

#[derive(Debug, Deserialize)]
struct ProgramsResponse {
    items: Vec<ProgramSummary>,
}

#[derive(Debug, Deserialize)]
struct ProgramSummary {
    slug: String,
}

#[derive(Debug, Deserialize)]
struct ScopesResponse {
    scopes: Vec<ScopeEntry>,
}

#[derive(Debug, Deserialize)]
struct ScopeEntry {
    scope: String,
    scope_type: String,
    #[serde(default)]
    description: Option<String>,
}

#[async_trait]
impl PlatformPoller for YesWeHackPoller {
    fn name(&self) -> &'static str {
        "yeswehack"
    }

    async fn authenticate(&self, auth: &AuthConfig) -> Result<()> {
        let email = auth
            .email
            .as_deref()
            .ok_or_else(|| Error::Authentication("missing yeswehack.email".to_string()))?;
        let password = auth
            .password
            .as_deref()
            .ok_or_else(|| Error::Authentication("missing yeswehack.password".to_string()))?;

        let response = self
            .client
            .post(format!("{BASE_URL}/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Error::Authentication(format!(
                "yeswehack login failed: {}",
                response.status()
            )));
        }
        let _: LoginResponse = response.json().await?;
        Ok(())
    }

    async fn list_program_handles(&self, opts: &PollOptions) -> Result<Vec<String>> {
        let mut url = format!("{BASE_URL}/programs");
        if opts.private_only {
            url.push_str("?private=true");
        }

        let response: ProgramsResponse = self.client.get(url).send().await?.json().await?;
        Ok(response.items.into_iter().map(|p| p.slug).collect())
    }

    async fn fetch_program_scope(&self, handle: &str, _opts: &PollOptions) -> Result<ProgramData> {
        let response: ScopesResponse = self
            .client
            .get(format!("{BASE_URL}/programs/{handle}/scopes"))
            .send()
            .await?
            .json()
            .await?;

        let mut in_scope = Vec::new();
        for entry in response.scopes {
            in_scope.push(RawScopeItem {
                target: entry.scope,
                description: entry.description,
                category: entry.scope_type,
                in_scope: true,
                is_bbp: true,
            });
        }

        Ok(ProgramData {
            url: format!("https://yeswehack.com/programs/{handle}"),
            in_scope,
            out_of_scope: Vec::new(),
        })
    }
}
