use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Platform;

/// Classification produced by the differ for a single reconciled row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Added,
    Updated,
    Removed,
}

impl ChangeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Added => "added",
            ChangeType::Updated => "updated",
            ChangeType::Removed => "removed",
        }
    }
}

/// Append-only audit row. Denormalizes enough fields to survive the
/// deletion of the program/target it concerns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScopeChange {
    pub occurred_at: DateTime<Utc>,
    pub program_url: String,
    pub platform: Platform,
    pub handle: String,
    pub target_normalized: String,
    pub target_raw: String,
    /// Populated only when the change concerns an AI-enhancement overlay.
    pub target_ai_normalized: Option<String>,
    pub category: String,
    pub in_scope: bool,
    pub is_bbp: bool,
    pub change_type: ChangeType,
}

impl ScopeChange {
    /// The synthetic row emitted when an entire program is removed by
    /// [`crate::Platform`]-wide sync, using the reserved pseudo-category
    /// `"program"`.
    pub fn program_removed(program_url: String, platform: Platform, handle: String) -> Self {
        ScopeChange {
            occurred_at: Utc::now(),
            program_url,
            platform,
            handle,
            target_normalized: String::new(),
            target_raw: String::new(),
            target_ai_normalized: None,
            category: "program".to_string(),
            in_scope: false,
            is_bbp: false,
            change_type: ChangeType::Removed,
        }
    }
}

/// In case a consumer needs a lighter-weight row than the full persisted
/// [`ScopeChange`] (e.g. for printing during a still-in-flight cycle),
/// this is the same shape before `occurred_at`/category-as-string has been
/// fixed up for storage.
pub type Change = ScopeChange;
