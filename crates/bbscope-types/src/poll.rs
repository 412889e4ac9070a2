use serde::{Deserialize, Serialize};

/// Credentials handed to [`authenticate`] by the coordinator. Every field is
/// optional because each platform consumes a different subset.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub otp_secret: Option<String>,
    pub proxy: Option<String>,
}

/// Filter flags threaded through `list_program_handles`/`fetch_program_scope`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PollOptions {
    pub bounty_only: bool,
    pub private_only: bool,
    pub categories: Vec<String>,
}

/// One raw scope line as the platform reported it, before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawScopeItem {
    pub target: String,
    pub description: Option<String>,
    pub category: String,
    pub in_scope: bool,
    pub is_bbp: bool,
}

/// The `{url, in_scope[], out_of_scope[]}` triple every poller adapter
/// returns for one program handle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramData {
    pub url: String,
    pub in_scope: Vec<RawScopeItem>,
    pub out_of_scope: Vec<RawScopeItem>,
}

impl ProgramData {
    /// Flattened view used by `BuildEntries`: every item with its
    /// `in_scope` flag already settled from which bucket it came from.
    pub fn all_items(self) -> Vec<RawScopeItem> {
        let mut items = self.in_scope;
        items.extend(self.out_of_scope);
        items
    }
}

/// An alternative value the AI normalizer proposes for one target.
/// `category`/`in_scope` are `None` when the AI pass agrees with the raw
/// value on that field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetVariant {
    pub value: String,
    pub category: Option<String>,
    pub in_scope: Option<bool>,
}

/// A normalized incoming entry ready for the differ: the canonical target
/// string, its unified category, and whatever AI variants were produced
/// for it (empty when AI enhancement is disabled or failed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScopeEntry {
    pub target: String,
    pub category: crate::Category,
    pub description: Option<String>,
    pub in_scope: bool,
    pub is_bbp: bool,
    pub variants: Vec<TargetVariant>,
}
