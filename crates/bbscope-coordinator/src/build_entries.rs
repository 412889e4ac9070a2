use bbscope_types::{Error, Platform, RawScopeItem, Result, ScopeEntry};

/// Canonicalizes a poller's raw scope items into the `ScopeEntry` shape the
/// differ expects: normalized target string, unified category, `variants`
/// left empty for the AI pass to fill in later.
///
/// `program_url`/`platform`/`handle` are the call's required identity.
/// `program_url`/`handle` are plain strings and can arrive empty from a
/// misbehaving caller, which is treated as a fatal input error rather
/// than silently producing entries for nobody; `platform` is accepted
/// for the same identity contract even though its enum can't itself be
/// "missing".
pub fn build_entries(
    program_url: &str,
    _platform: Platform,
    handle: &str,
    items: Vec<RawScopeItem>,
) -> Result<Vec<ScopeEntry>> {
    if program_url.is_empty() {
        return Err(Error::MissingField("program_url".to_string()));
    }
    if handle.is_empty() {
        return Err(Error::MissingField("handle".to_string()));
    }

    Ok(items
        .into_iter()
        .map(|item| ScopeEntry {
            target: bbscope_normalize::canonicalize_target(&item.target),
            category: bbscope_normalize::unify_category(&item.category),
            description: item.description,
            in_scope: item.in_scope,
            is_bbp: item.is_bbp,
            variants: Vec::new(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalizes_target_and_unifies_category() {
        let items = vec![RawScopeItem {
            target: "Example.COM".to_string(),
            description: None,
            category: "web application".to_string(),
            in_scope: true,
            is_bbp: true,
        }];

        let entries =
            build_entries("https://hackerone.com/acme", Platform::HackerOne, "acme", items).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target, "https://example.com");
        assert_eq!(entries[0].category, bbscope_types::Category::Url);
        assert!(entries[0].variants.is_empty());
    }

    #[test]
    fn empty_program_url_is_a_fatal_input_error() {
        let err = build_entries("", Platform::HackerOne, "acme", Vec::new()).unwrap_err();
        assert!(matches!(err, Error::MissingField(field) if field == "program_url"));
    }

    #[test]
    fn empty_handle_is_a_fatal_input_error() {
        let err = build_entries("https://hackerone.com/acme", Platform::HackerOne, "", Vec::new())
            .unwrap_err();
        assert!(matches!(err, Error::MissingField(field) if field == "handle"));
    }
}
