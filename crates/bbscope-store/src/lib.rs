//! The transactional SQLite store: schema, the diff-and-persist core
//! (`UpsertProgramEntries`), and the read-side query surface the CLI hits.

mod db;
mod differ;
mod error;
mod queries;
mod records;
mod schema;

pub use bbscope_types::{Category, Change, ChangeType, Entry, EntrySource, Platform, Program, ScopeChange};
pub use db::{Stats, Store};
pub use error::{Error, Result};
pub use queries::target::ListEntriesOptions;

#[cfg(test)]
mod tests {
    use super::*;
    use bbscope_testing::assertions::{assert_no_change, assert_single_change};
    use bbscope_testing::fixtures::{scope_entry, with_variant};

    #[test]
    fn first_run_population_emits_added_rows_and_is_idempotent() {
        let mut store = Store::open_in_memory().unwrap();
        let entries = vec![
            scope_entry("https://a.example.com", Category::Url),
            scope_entry("https://b.example.com", Category::Url),
        ];

        let changes = store
            .upsert_program_entries("https://hackerone.com/acme", Platform::HackerOne, "acme", &entries)
            .unwrap();
        assert_eq!(changes.len(), 2);
        assert!(changes.iter().all(|c| c.change_type == ChangeType::Added));

        let changes_again = store
            .upsert_program_entries("https://hackerone.com/acme", Platform::HackerOne, "acme", &entries)
            .unwrap();
        assert!(changes_again.is_empty());
    }

    #[test]
    fn addition_and_removal_are_classified_correctly() {
        let mut store = Store::open_in_memory().unwrap();
        let first = vec![
            scope_entry("https://x.example.com", Category::Url),
            scope_entry("https://y.example.com", Category::Url),
        ];
        store
            .upsert_program_entries("https://hackerone.com/acme", Platform::HackerOne, "acme", &first)
            .unwrap();

        let second = vec![
            scope_entry("https://x.example.com", Category::Url),
            scope_entry("https://z.example.com", Category::Url),
        ];
        let changes = store
            .upsert_program_entries("https://hackerone.com/acme", Platform::HackerOne, "acme", &second)
            .unwrap();

        assert_single_change(&changes, "https://z.example.com", ChangeType::Added).unwrap();
        assert_single_change(&changes, "https://y.example.com", ChangeType::Removed).unwrap();
        assert_no_change(&changes, "https://x.example.com").unwrap();
    }

    #[test]
    fn empty_entries_against_stored_scope_aborts_as_scope_wipe() {
        let mut store = Store::open_in_memory().unwrap();
        let first = vec![scope_entry("https://a.example.com", Category::Url)];
        store
            .upsert_program_entries("https://hackerone.com/acme", Platform::HackerOne, "acme", &first)
            .unwrap();

        let before = store
            .get_program("https://hackerone.com/acme")
            .unwrap()
            .expect("program must exist after first upsert");

        let err = store
            .upsert_program_entries("https://hackerone.com/acme", Platform::HackerOne, "acme", &[])
            .unwrap_err();
        assert!(err.is_scope_wipe());

        let entries = store
            .list_entries(&ListEntriesOptions::default())
            .unwrap();
        assert_eq!(entries.len(), 1, "scope-wipe guard must not mutate stored state");

        let after = store
            .get_program("https://hackerone.com/acme")
            .unwrap()
            .expect("program must still exist after the aborted upsert");
        assert_eq!(
            after.last_seen_at, before.last_seen_at,
            "scope-wipe guard must not touch last_seen_at"
        );
        assert_eq!(after.disabled, before.disabled, "scope-wipe guard must not clear disabled");
    }

    #[test]
    fn sync_platform_programs_disables_vanished_programs_only() {
        let mut store = Store::open_in_memory().unwrap();
        let entries = vec![scope_entry("https://a.example.com", Category::Url)];
        store
            .upsert_program_entries("https://hackerone.com/acme", Platform::HackerOne, "acme", &entries)
            .unwrap();
        store
            .upsert_program_entries("https://hackerone.com/globex", Platform::HackerOne, "globex", &entries)
            .unwrap();

        let changes = store
            .sync_platform_programs(Platform::HackerOne, &["https://hackerone.com/acme".to_string()])
            .unwrap();

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].change_type, ChangeType::Removed);
        assert_eq!(changes[0].category, "program");
        assert_eq!(changes[0].program_url, "https://hackerone.com/globex");

        let remaining = store.list_entries(&ListEntriesOptions::default()).unwrap();
        assert!(remaining.iter().all(|e| e.program_url != "https://hackerone.com/globex"));
    }

    #[test]
    fn ai_overlay_is_returned_by_list_entries() {
        let mut store = Store::open_in_memory().unwrap();
        let e = with_variant(scope_entry("https://example.com/api", Category::Url), "https://api.example.com");

        store
            .upsert_program_entries("https://hackerone.com/acme", Platform::HackerOne, "acme", &[e])
            .unwrap();

        let entries = store.list_entries(&ListEntriesOptions::default()).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].target, "https://api.example.com");
        assert_eq!(entries[0].source, EntrySource::Ai);

        let found = store.search_targets("api.example.com").unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn search_falls_back_to_historical_entries_once_a_target_is_removed() {
        let mut store = Store::open_in_memory().unwrap();
        let first = vec![
            scope_entry("https://stays.example.com", Category::Url),
            scope_entry("https://gone.example.com", Category::Url),
        ];
        store
            .upsert_program_entries("https://hackerone.com/acme", Platform::HackerOne, "acme", &first)
            .unwrap();

        // Drop `gone.example.com` from the next poll; it stays current since
        // `stays.example.com` keeps the program from tripping the scope-wipe guard.
        // The removal only reaches `scope_changes` once logged, same as a real
        // poll cycle does via `Store::log_changes`.
        let second = vec![scope_entry("https://stays.example.com", Category::Url)];
        let changes = store
            .upsert_program_entries("https://hackerone.com/acme", Platform::HackerOne, "acme", &second)
            .unwrap();
        store.log_changes(&changes).unwrap();

        let current = store.search_targets("stays.example.com").unwrap();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].source, EntrySource::Raw);

        let historical = store.search_targets("gone.example.com").unwrap();
        assert_eq!(historical.len(), 1);
        assert_eq!(historical[0].source, EntrySource::Historical);
        assert_eq!(historical[0].target, "https://gone.example.com");
    }
}
