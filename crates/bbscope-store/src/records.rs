use chrono::{DateTime, Utc};

/// Row shape of `programs`. Distinct from `bbscope_types::Program`: the
/// public type is a read-side projection, this one is what the differ
/// actually loads and mutates.
#[derive(Debug, Clone)]
pub struct ProgramRow {
    pub id: i64,
    pub platform: String,
    pub handle: String,
    pub url: String,
    pub first_seen_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
    pub disabled: bool,
    pub is_ignored: bool,
}

/// Row shape of `targets_raw`.
#[derive(Debug, Clone)]
pub struct RawTargetRow {
    pub id: i64,
    pub program_id: i64,
    pub target: String,
    pub category: String,
    pub description: Option<String>,
    pub in_scope: bool,
    pub is_bbp: bool,
    pub first_seen_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

impl RawTargetRow {
    pub fn identity_key(&self) -> String {
        bbscope_types::RawTarget::identity_key(&self.target, category_of(&self.category))
    }
}

fn category_of(raw: &str) -> bbscope_types::Category {
    bbscope_types::Category::from_canonical_str(raw).unwrap_or(bbscope_types::Category::Other)
}

/// Row shape of `targets_ai_enhanced`.
#[derive(Debug, Clone)]
pub struct AiVariantRow {
    pub id: i64,
    pub target_id: i64,
    pub target_ai_normalized: String,
    pub category: Option<String>,
    pub in_scope: Option<bool>,
    pub first_seen_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}
