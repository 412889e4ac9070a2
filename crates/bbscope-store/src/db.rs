use std::path::Path;

use bbscope_core::{retry_on_contention, RetryPolicy};
use bbscope_types::{ChangeType, Platform, Program, ScopeChange, ScopeEntry};
use rusqlite::Connection;

use crate::queries::target::ListEntriesOptions;
use crate::queries::{change, program, target};
use crate::records::ProgramRow;
use crate::{differ, Error, Result};

/// The store's transactional surface. Wraps a single `rusqlite` connection;
/// callers that need concurrent access share one `Store` behind a mutex —
/// SQLite itself serializes writers regardless.
pub struct Store {
    conn: Connection,
}

impl Store {
    /// `Open(resource, timeout)`. Opens the connection, applies schema
    /// idempotently, and sets a busy-timeout plus WAL mode as the
    /// write-ahead-logging equivalent.
    pub fn open(db_path: &Path, busy_timeout_ms: u32) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(db_path)?;
        Self::configure(&conn, busy_timeout_ms)?;
        Ok(Store { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::configure(&conn, 5_000)?;
        Ok(Store { conn })
    }

    fn configure(conn: &Connection, busy_timeout_ms: u32) -> Result<()> {
        conn.busy_timeout(std::time::Duration::from_millis(busy_timeout_ms as u64))?;
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA foreign_keys = ON;")?;
        crate::schema::init_schema(conn)?;
        Ok(())
    }

    /// `UpsertProgramEntries`. Retries on SQLite lock contention per the
    /// shared retry policy; `ErrAbortingScopeWipe` is a sentinel and is
    /// never retried.
    pub fn upsert_program_entries(
        &mut self,
        program_url: &str,
        platform: Platform,
        handle: &str,
        entries: &[ScopeEntry],
    ) -> Result<Vec<ScopeChange>> {
        let conn = &mut self.conn;
        retry_on_contention(
            || differ::upsert_program_entries(conn, program_url, platform, handle, entries),
            is_retryable,
        )
    }

    pub fn upsert_program_entries_with_policy(
        &mut self,
        policy: RetryPolicy,
        program_url: &str,
        platform: Platform,
        handle: &str,
        entries: &[ScopeEntry],
    ) -> Result<Vec<ScopeChange>> {
        let conn = &mut self.conn;
        bbscope_core::retry_on_contention_with(
            policy,
            || differ::upsert_program_entries(conn, program_url, platform, handle, entries),
            is_retryable,
        )
    }

    pub fn sync_platform_programs(
        &mut self,
        platform: Platform,
        polled_urls: &[String],
    ) -> Result<Vec<ScopeChange>> {
        differ::sync_platform_programs(&mut self.conn, platform, polled_urls)
    }

    pub fn log_changes(&self, changes: &[ScopeChange]) -> Result<()> {
        differ::log_changes(&self.conn, changes)
    }

    pub fn list_entries(&self, options: &ListEntriesOptions) -> Result<Vec<bbscope_types::Entry>> {
        target::list_entries(&self.conn, options)
    }

    pub fn search_targets(&self, query: &str) -> Result<Vec<bbscope_types::Entry>> {
        target::search(&self.conn, query)
    }

    pub fn list_recent_changes(&self, n: usize) -> Result<Vec<ScopeChange>> {
        change::list_recent(&self.conn, n)
    }

    pub fn get_stats(&self) -> Result<Stats> {
        let total_programs = program::get_active_program_count_total(&self.conn)?;
        let total_targets: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM targets_raw", [], |row| row.get(0))?;
        let in_scope_targets: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM targets_raw WHERE in_scope = 1",
            [],
            |row| row.get(0),
        )?;
        let total_changes: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM scope_changes", [], |row| row.get(0))?;

        Ok(Stats {
            active_programs: total_programs,
            total_targets: total_targets as usize,
            in_scope_targets: in_scope_targets as usize,
            total_changes: total_changes as usize,
        })
    }

    /// `AddCustomTarget`: a user-initiated addition outside the normal poll
    /// cycle. The program must already exist; custom targets attach to an
    /// existing program's scope rather than conjuring a program from thin
    /// air.
    pub fn add_custom_target(
        &self,
        program_url: &str,
        target_value: &str,
        category: bbscope_types::Category,
        in_scope: bool,
    ) -> Result<()> {
        let row = program::get_by_url(&self.conn, program_url)?.ok_or_else(|| {
            Error::Query(format!("no program with url {program_url}; poll it at least once first"))
        })?;

        let now = chrono::Utc::now();
        target::insert(
            &self.conn,
            row.id,
            target_value,
            category.as_str(),
            None,
            in_scope,
            false,
            now,
        )?;

        change::insert(
            &self.conn,
            &ScopeChange {
                occurred_at: now,
                program_url: program_url.to_string(),
                platform: Platform::from_str_opt(&row.platform).unwrap_or(Platform::HackerOne),
                handle: row.handle,
                target_normalized: target_value.to_string(),
                target_raw: target_value.to_string(),
                target_ai_normalized: None,
                category: category.as_str().to_string(),
                in_scope,
                is_bbp: false,
                change_type: ChangeType::Added,
            },
        )?;

        Ok(())
    }

    pub fn set_program_ignored_status(&self, pattern: &str, ignored: bool) -> Result<usize> {
        program::set_ignored_status(&self.conn, pattern, ignored)
    }

    pub fn get_active_program_count(&self, platform: Platform) -> Result<usize> {
        program::get_active_count(&self.conn, platform.as_str())
    }

    pub fn get_ignored_program_urls(&self, platform: Platform) -> Result<Vec<String>> {
        program::get_ignored_urls(&self.conn, platform.as_str())
    }

    pub fn get_ignored_programs(&self, platform: Platform) -> Result<Vec<Program>> {
        let rows = program::get_ignored_programs(&self.conn, platform.as_str())?;
        Ok(rows.into_iter().map(to_public_program).collect())
    }

    pub fn get_program(&self, url: &str) -> Result<Option<Program>> {
        Ok(program::get_by_url(&self.conn, url)?.map(to_public_program))
    }
}

/// Summary counters for the `stats` CLI subcommand.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Stats {
    pub active_programs: usize,
    pub total_targets: usize,
    pub in_scope_targets: usize,
    pub total_changes: usize,
}

fn to_public_program(row: ProgramRow) -> Program {
    Program {
        id: row.id,
        platform: Platform::from_str_opt(&row.platform).unwrap_or(Platform::HackerOne),
        handle: row.handle,
        url: row.url,
        first_seen_at: row.first_seen_at,
        last_seen_at: row.last_seen_at,
        disabled: row.disabled,
        is_ignored: row.is_ignored,
    }
}

/// `rusqlite` surfaces SQLite's `SQLITE_BUSY`/`SQLITE_LOCKED` as
/// `SqliteFailure` with a matching `ErrorCode`; check that directly rather
/// than string-matching the message.
fn is_retryable(err: &Error) -> bool {
    matches!(
        err,
        Error::Database(rusqlite::Error::SqliteFailure(inner, _))
            if matches!(
                inner.code,
                rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
            )
    )
}
