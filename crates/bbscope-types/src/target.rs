use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Category;

/// The ground-truth target as asserted by the platform.
///
/// Identity within a program is `(program_id, category, target)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTarget {
    pub id: i64,
    pub program_id: i64,
    pub target: String,
    pub category: Category,
    pub description: Option<String>,
    pub in_scope: bool,
    pub is_bbp: bool,
    pub first_seen_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl RawTarget {
    /// `lower(target) | lower(category)` — the uniqueness key within a program.
    pub fn identity_key(target: &str, category: Category) -> String {
        format!(
            "{}|{}",
            target.to_lowercase(),
            category.as_str().to_lowercase()
        )
    }
}

/// An alternative (AI-produced) view of one [`RawTarget`].
///
/// `category`/`in_scope` are `Some` only when they differ from the parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiEnhancement {
    pub id: i64,
    pub target_id: i64,
    pub target_ai_normalized: String,
    pub category: Option<Category>,
    pub in_scope: Option<bool>,
    pub first_seen_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Where a listed [`crate::Entry`]'s displayed fields were sourced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntrySource {
    Raw,
    Ai,
    Historical,
}

/// A read-side projection that overlays an [`AiEnhancement`] over its
/// parent [`RawTarget`] the way `ListEntries`/`SearchTargets` return rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub program_url: String,
    pub platform: crate::Platform,
    pub handle: String,
    pub target: String,
    pub category: Category,
    pub in_scope: bool,
    pub is_bbp: bool,
    pub description: Option<String>,
    pub source: EntrySource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_key_is_case_insensitive() {
        assert_eq!(
            RawTarget::identity_key("Example.com", Category::Url),
            RawTarget::identity_key("example.com", Category::Url)
        );
    }

    #[test]
    fn identity_key_differs_by_category() {
        assert_ne!(
            RawTarget::identity_key("example.com", Category::Url),
            RawTarget::identity_key("example.com", Category::Wildcard)
        );
    }
}
