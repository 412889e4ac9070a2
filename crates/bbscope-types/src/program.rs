use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Platform;

/// A bug-bounty program as tracked in the store.
///
/// `url` is the sole identity: it must be globally unique and already
/// canonicalized by the normalizer before it reaches this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub id: i64,
    pub platform: Platform,
    pub handle: String,
    pub url: String,
    pub first_seen_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
    pub disabled: bool,
    pub is_ignored: bool,
}
