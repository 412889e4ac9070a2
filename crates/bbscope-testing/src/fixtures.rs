use bbscope_types::{Category, ProgramData, RawScopeItem, ScopeEntry, TargetVariant};

/// Build a single in-scope raw scope item with minimal boilerplate.
pub fn raw_item(target: &str, category: &str) -> RawScopeItem {
    RawScopeItem {
        target: target.to_string(),
        description: None,
        category: category.to_string(),
        in_scope: true,
        is_bbp: true,
    }
}

/// Build a `ProgramData` with a single `in_scope` bucket, the common case
/// for a poller fixture.
pub fn program_data(url: &str, items: Vec<RawScopeItem>) -> ProgramData {
    ProgramData {
        url: url.to_string(),
        in_scope: items,
        out_of_scope: Vec::new(),
    }
}

/// Build an already-normalized `ScopeEntry`, the shape the differ consumes.
pub fn scope_entry(target: &str, category: Category) -> ScopeEntry {
    ScopeEntry {
        target: target.to_string(),
        category,
        description: None,
        in_scope: true,
        is_bbp: true,
        variants: Vec::new(),
    }
}

pub fn with_variant(mut entry: ScopeEntry, value: &str) -> ScopeEntry {
    entry.variants.push(TargetVariant {
        value: value.to_string(),
        category: None,
        in_scope: None,
    });
    entry
}
