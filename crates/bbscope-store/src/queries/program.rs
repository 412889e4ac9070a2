use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use crate::records::ProgramRow;
use crate::Result;

fn row_to_program(row: &rusqlite::Row) -> rusqlite::Result<ProgramRow> {
    Ok(ProgramRow {
        id: row.get(0)?,
        platform: row.get(1)?,
        handle: row.get(2)?,
        url: row.get(3)?,
        first_seen_at: row.get(4)?,
        last_seen_at: row.get(5)?,
        disabled: row.get::<_, i64>(6)? != 0,
        is_ignored: row.get::<_, i64>(7)? != 0,
    })
}

const SELECT_COLUMNS: &str =
    "id, platform, handle, url, first_seen_at, last_seen_at, disabled, is_ignored";

/// Get the program row for `url`, creating it if absent. Either way,
/// refreshes `last_seen_at` to `now` and clears `disabled`.
pub fn get_or_create_and_touch(
    conn: &Connection,
    platform: &str,
    handle: &str,
    url: &str,
    now: DateTime<Utc>,
) -> Result<ProgramRow> {
    conn.execute(
        r#"
        INSERT INTO programs (platform, handle, url, first_seen_at, last_seen_at, disabled, is_ignored)
        VALUES (?1, ?2, ?3, ?4, ?4, 0, 0)
        ON CONFLICT(url) DO UPDATE SET
            handle = ?2,
            last_seen_at = ?4,
            disabled = 0
        "#,
        params![platform, handle, url, now],
    )?;

    get_by_url(conn, url)?.ok_or_else(|| {
        crate::Error::Query(format!("program {url} vanished immediately after upsert"))
    })
}

pub fn get_by_url(conn: &Connection, url: &str) -> Result<Option<ProgramRow>> {
    let query = format!("SELECT {SELECT_COLUMNS} FROM programs WHERE url = ?1");
    Ok(conn.query_row(&query, [url], row_to_program).optional()?)
}

pub fn get_active_count(conn: &Connection, platform: &str) -> Result<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM programs WHERE platform = ?1 AND disabled = 0",
        [platform],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

pub fn get_ignored_urls(conn: &Connection, platform: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare(
        "SELECT url FROM programs WHERE platform = ?1 AND is_ignored = 1 AND disabled = 0",
    )?;
    let urls = stmt
        .query_map([platform], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(urls)
}

pub fn list_active_urls_for_platform(conn: &Connection, platform: &str) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT url FROM programs WHERE platform = ?1 AND disabled = 0")?;
    let urls = stmt
        .query_map([platform], |row| row.get(0))?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(urls)
}

pub fn list_active_for_platform_not_in(
    conn: &Connection,
    platform: &str,
    keep_urls: &[String],
) -> Result<Vec<ProgramRow>> {
    let all = list_active_full_for_platform(conn, platform)?;
    Ok(all
        .into_iter()
        .filter(|p| !keep_urls.iter().any(|u| u == &p.url))
        .collect())
}

fn list_active_full_for_platform(conn: &Connection, platform: &str) -> Result<Vec<ProgramRow>> {
    let query = format!("SELECT {SELECT_COLUMNS} FROM programs WHERE platform = ?1 AND disabled = 0");
    let mut stmt = conn.prepare(&query)?;
    let rows = stmt
        .query_map([platform], row_to_program)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn disable(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("UPDATE programs SET disabled = 1 WHERE id = ?1", [id])?;
    Ok(())
}

pub fn delete_targets_for_program(conn: &Connection, program_id: i64) -> Result<()> {
    conn.execute(
        "DELETE FROM targets_raw WHERE program_id = ?1",
        [program_id],
    )?;
    Ok(())
}

/// `SetProgramIgnoredStatus`: substring (`LIKE %pattern%`) match against
/// program URLs, case-insensitive by SQLite's default `LIKE` collation.
pub fn set_ignored_status(conn: &Connection, pattern: &str, ignored: bool) -> Result<usize> {
    let like_pattern = format!("%{pattern}%");
    let changed = conn.execute(
        "UPDATE programs SET is_ignored = ?1 WHERE url LIKE ?2",
        params![ignored as i64, like_pattern],
    )?;
    Ok(changed)
}

pub fn get_ignored_programs(conn: &Connection, platform: &str) -> Result<Vec<ProgramRow>> {
    let query = format!("SELECT {SELECT_COLUMNS} FROM programs WHERE platform = ?1 AND is_ignored = 1");
    let mut stmt = conn.prepare(&query)?;
    let rows = stmt
        .query_map([platform], row_to_program)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn get_active_program_count_total(conn: &Connection) -> Result<usize> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM programs WHERE disabled = 0", [], |row| {
        row.get(0)
    })?;
    Ok(count as usize)
}
