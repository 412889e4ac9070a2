use bbscope_types::Category;

/// Map a platform-specific raw category string to the closed vocabulary.
///
/// This table is the single source of truth consulted by both the store
/// (when `BuildEntries` normalizes incoming poll results) and poller
/// adapters that want to pre-classify a raw asset type before it reaches
/// the store. Matching is case-insensitive and ignores `-`/`_` punctuation
/// so `mobile-application-android`, `MOBILE_APPLICATION_ANDROID`, and
/// `mobile application android` all resolve the same way.
///
/// Unknown raw categories fall back to [`Category::Other`]; the caller is
/// still expected to retain the original raw string in `description` if it
/// wants it preserved for audit purposes — unification never fails.
pub fn unify_category(raw: &str) -> Category {
    let key = normalize_key(raw);

    for (category, aliases) in TABLE {
        if aliases.iter().any(|alias| *alias == key) {
            return *category;
        }
    }

    Category::Other
}

/// Lowercase and collapse `-`/`_`/whitespace runs to single spaces so the
/// table only has to list one punctuation style per alias.
fn normalize_key(raw: &str) -> String {
    let lower = raw.trim().to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut last_was_space = false;
    for ch in lower.chars() {
        if ch == '-' || ch == '_' || ch.is_whitespace() {
            if !last_was_space && !out.is_empty() {
                out.push(' ');
            }
            last_was_space = true;
        } else {
            out.push(ch);
            last_was_space = false;
        }
    }
    out.trim_end().to_string()
}

type Table = &'static [(Category, &'static [&'static str])];

const TABLE: Table = &[
    (
        Category::Url,
        &[
            "url",
            "website",
            "web application",
            "web app",
            "webapp",
            "domain",
        ],
    ),
    (
        Category::Wildcard,
        &["wildcard", "wildcard domain", "subdomain wildcard"],
    ),
    (
        Category::Cidr,
        &[
            "cidr",
            "ip address",
            "ip range",
            "infrastructure",
            "network range",
        ],
    ),
    (
        Category::Android,
        &[
            "android",
            "mobile application android",
            "google play app id",
            "other apk",
            "apk",
        ],
    ),
    (
        Category::Ios,
        &[
            "ios",
            "mobile application ios",
            "testflight",
            "other ipa",
            "ipa",
            "apple store app id",
        ],
    ),
    (
        Category::Ai,
        &["ai", "ai model", "ai application", "llm", "prompt"],
    ),
    (
        Category::Hardware,
        &[
            "hardware",
            "device",
            "iot",
            "wireless network",
            "physical device",
        ],
    ),
    (
        Category::Blockchain,
        &[
            "blockchain",
            "smart contract",
            "smart contracts",
            "contract address",
        ],
    ),
    (
        Category::Binary,
        &[
            "binary",
            "other executables",
            "executable",
            "application system test",
        ],
    ),
    (
        Category::Code,
        &["code", "source code", "repository", "github repository"],
    ),
    (Category::Other, &["other"]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_hackerone_style_strings() {
        assert_eq!(unify_category("GOOGLE_PLAY_APP_ID"), Category::Android);
        assert_eq!(unify_category("OTHER_APK"), Category::Android);
        assert_eq!(unify_category("MOBILE_APPLICATION_IOS"), Category::Ios);
        assert_eq!(unify_category("SMART_CONTRACT"), Category::Blockchain);
        assert_eq!(unify_category("SOURCE_CODE"), Category::Code);
    }

    #[test]
    fn maps_yeswehack_style_strings() {
        assert_eq!(
            unify_category("mobile-application-android"),
            Category::Android
        );
        assert_eq!(unify_category("web-application"), Category::Url);
    }

    #[test]
    fn unknown_raw_category_falls_back_to_other() {
        assert_eq!(unify_category("totally-unknown-thing"), Category::Other);
    }

    #[test]
    fn matching_is_case_and_punctuation_insensitive() {
        assert_eq!(unify_category("Hardware"), unify_category("HARDWARE"));
        assert_eq!(unify_category("ip_address"), unify_category("IP ADDRESS"));
    }

    #[test]
    fn every_canonical_category_has_a_table_entry() {
        for category in Category::ALL {
            assert!(
                TABLE.iter().any(|(c, _)| *c == category),
                "category {category:?} has no table entry"
            );
        }
    }

    /// Pins the full alias table against accidental reordering or a typo'd
    /// alias slipping into the wrong bucket — any change to `TABLE` shows up
    /// as a diff in the reviewed snapshot instead of silently changing which
    /// raw strings map to which category.
    #[test]
    fn category_table_snapshot() {
        let resolved: Vec<(Category, &str)> = TABLE
            .iter()
            .flat_map(|(category, aliases)| aliases.iter().map(move |alias| (*category, *alias)))
            .collect();
        insta::assert_debug_snapshot!(resolved);
    }
}
