use serde::{Deserialize, Serialize};

/// Closed vocabulary every platform-specific category string is unified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Url,
    Wildcard,
    Cidr,
    Android,
    Ios,
    Ai,
    Hardware,
    Blockchain,
    Binary,
    Code,
    Other,
}

impl Category {
    pub const ALL: [Category; 11] = [
        Category::Url,
        Category::Wildcard,
        Category::Cidr,
        Category::Android,
        Category::Ios,
        Category::Ai,
        Category::Hardware,
        Category::Blockchain,
        Category::Binary,
        Category::Code,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Url => "url",
            Category::Wildcard => "wildcard",
            Category::Cidr => "cidr",
            Category::Android => "android",
            Category::Ios => "ios",
            Category::Ai => "ai",
            Category::Hardware => "hardware",
            Category::Blockchain => "blockchain",
            Category::Binary => "binary",
            Category::Code => "code",
            Category::Other => "other",
        }
    }

    pub fn from_canonical_str(s: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for c in Category::ALL {
            assert_eq!(Category::from_canonical_str(c.as_str()), Some(c));
        }
    }

    #[test]
    fn rejects_unknown_string() {
        assert_eq!(Category::from_canonical_str("not_a_category"), None);
    }
}
