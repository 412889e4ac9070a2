use serde::{Deserialize, Serialize};

/// A supported bug-bounty platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    HackerOne,
    Bugcrowd,
    Intigriti,
    YesWeHack,
    Immunefi,
}

impl Platform {
    pub const ALL: [Platform; 5] = [
        Platform::HackerOne,
        Platform::Bugcrowd,
        Platform::Intigriti,
        Platform::YesWeHack,
        Platform::Immunefi,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::HackerOne => "hackerone",
            Platform::Bugcrowd => "bugcrowd",
            Platform::Intigriti => "intigriti",
            Platform::YesWeHack => "yeswehack",
            Platform::Immunefi => "immunefi",
        }
    }

    pub fn from_str_opt(s: &str) -> Option<Platform> {
        Platform::ALL.into_iter().find(|p| p.as_str() == s)
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::from_str_opt(s).ok_or_else(|| format!("unknown platform: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for p in Platform::ALL {
            assert_eq!(Platform::from_str_opt(p.as_str()), Some(p));
        }
    }
}
