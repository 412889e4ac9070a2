use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::records::RawTargetRow;
use crate::Result;

const SELECT_COLUMNS: &str =
    "id, program_id, target, category, description, in_scope, is_bbp, first_seen_at, last_seen_at";

fn row_to_target(row: &rusqlite::Row) -> rusqlite::Result<RawTargetRow> {
    Ok(RawTargetRow {
        id: row.get(0)?,
        program_id: row.get(1)?,
        target: row.get(2)?,
        category: row.get(3)?,
        description: row.get(4)?,
        in_scope: row.get::<_, i64>(5)? != 0,
        is_bbp: row.get::<_, i64>(6)? != 0,
        first_seen_at: row.get(7)?,
        last_seen_at: row.get(8)?,
    })
}

pub fn list_for_program(conn: &Connection, program_id: i64) -> Result<Vec<RawTargetRow>> {
    let query = format!("SELECT {SELECT_COLUMNS} FROM targets_raw WHERE program_id = ?1");
    let mut stmt = conn.prepare(&query)?;
    let rows = stmt
        .query_map([program_id], row_to_target)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

#[allow(clippy::too_many_arguments)]
pub fn insert(
    conn: &Connection,
    program_id: i64,
    target: &str,
    category: &str,
    description: Option<&str>,
    in_scope: bool,
    is_bbp: bool,
    now: DateTime<Utc>,
) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO targets_raw
            (program_id, target, category, description, in_scope, is_bbp, first_seen_at, last_seen_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
        "#,
        params![
            program_id,
            target,
            category,
            description,
            in_scope as i64,
            is_bbp as i64,
            now
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(
    conn: &Connection,
    id: i64,
    description: Option<&str>,
    in_scope: bool,
    is_bbp: bool,
    now: DateTime<Utc>,
) -> Result<()> {
    conn.execute(
        r#"
        UPDATE targets_raw
        SET description = ?2, in_scope = ?3, is_bbp = ?4, last_seen_at = ?5
        WHERE id = ?1
        "#,
        params![id, description, in_scope as i64, is_bbp as i64, now],
    )?;
    Ok(())
}

pub fn touch(conn: &Connection, id: i64, now: DateTime<Utc>) -> Result<()> {
    conn.execute(
        "UPDATE targets_raw SET last_seen_at = ?2 WHERE id = ?1",
        params![id, now],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM targets_raw WHERE id = ?1", [id])?;
    Ok(())
}

/// `SearchTargets`. Matches live scope first (raw + AI overlay, same as
/// `list_entries`), then falls back to the audit trail in `scope_changes`
/// for matches that are no longer live — a target a program once listed
/// and has since removed. Those are tagged `EntrySource::Historical` and
/// never shadow a live match for the same program/target pair.
pub fn search(conn: &Connection, query: &str) -> Result<Vec<crate::Entry>> {
    let pattern = format!("%{query}%");
    let mut stmt = conn.prepare(
        r#"
        SELECT p.url, p.platform, p.handle, t.target, t.category, t.in_scope, t.is_bbp, t.description,
               a.target_ai_normalized, a.category, a.in_scope
        FROM targets_raw t
        JOIN programs p ON p.id = t.program_id
        LEFT JOIN targets_ai_enhanced a ON a.target_id = t.id
        WHERE p.disabled = 0 AND (t.target LIKE ?1 OR a.target_ai_normalized LIKE ?1)
        "#,
    )?;
    let live: Vec<crate::Entry> = stmt
        .query_map([&pattern], row_to_entry)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(crate::Error::from)?;

    let live_keys: std::collections::HashSet<(String, String)> =
        live.iter().map(|e| (e.program_url.clone(), e.target.clone())).collect();

    let mut results = live;
    results.extend(search_historical(conn, &pattern, &live_keys)?);
    Ok(results)
}

/// Scans `scope_changes` for target matches no longer present in the live
/// tables. `category = 'program'` rows are the synthetic whole-program
/// removal markers `sync_platform_programs` writes, not real targets, so
/// they're excluded. Most recent row per (program_url, target) wins, since
/// the same target can appear in the log multiple times across its life.
fn search_historical(
    conn: &Connection,
    pattern: &str,
    live_keys: &std::collections::HashSet<(String, String)>,
) -> Result<Vec<crate::Entry>> {
    use bbscope_types::{Category, Entry, EntrySource, Platform};

    let mut stmt = conn.prepare(
        r#"
        SELECT program_url, platform, handle, target_normalized, target_ai_normalized,
               category, in_scope, is_bbp
        FROM scope_changes
        WHERE category != 'program' AND (target_normalized LIKE ?1 OR target_ai_normalized LIKE ?1)
        ORDER BY occurred_at DESC
        "#,
    )?;

    let rows = stmt.query_map([pattern], |row| {
        let program_url: String = row.get(0)?;
        let platform_str: String = row.get(1)?;
        let handle: String = row.get(2)?;
        let target_normalized: String = row.get(3)?;
        let target_ai_normalized: Option<String> = row.get(4)?;
        let category: String = row.get(5)?;
        let in_scope = row.get::<_, i64>(6)? != 0;
        let is_bbp = row.get::<_, i64>(7)? != 0;
        Ok((
            program_url,
            platform_str,
            handle,
            target_ai_normalized.unwrap_or(target_normalized),
            category,
            in_scope,
            is_bbp,
        ))
    })?;

    let mut seen: std::collections::HashSet<(String, String)> = std::collections::HashSet::new();
    let mut entries = Vec::new();
    for row in rows {
        let (program_url, platform_str, handle, target, category, in_scope, is_bbp) =
            row.map_err(crate::Error::from)?;
        let key = (program_url.clone(), target.clone());
        if live_keys.contains(&key) || !seen.insert(key) {
            continue;
        }

        entries.push(Entry {
            program_url,
            platform: Platform::from_str_opt(&platform_str).unwrap_or(Platform::HackerOne),
            handle,
            target,
            category: Category::from_canonical_str(&category).unwrap_or(Category::Other),
            in_scope,
            is_bbp,
            description: None,
            source: EntrySource::Historical,
        });
    }

    Ok(entries)
}

#[derive(Default, Clone)]
pub struct ListEntriesOptions {
    pub platform: Option<String>,
    pub category: Option<String>,
    pub in_scope_only: bool,
}

pub fn list_entries(conn: &Connection, options: &ListEntriesOptions) -> Result<Vec<crate::Entry>> {
    let mut where_clauses = vec!["p.disabled = 0".to_string()];
    if let Some(platform) = &options.platform {
        where_clauses.push(format!("p.platform = '{}'", sql_escape(platform)));
    }
    if let Some(category) = &options.category {
        where_clauses.push(format!("t.category = '{}'", sql_escape(category)));
    }
    if options.in_scope_only {
        where_clauses.push("t.in_scope = 1".to_string());
    }
    let where_clause = where_clauses.join(" AND ");

    let query = format!(
        r#"
        SELECT p.url, p.platform, p.handle, t.target, t.category, t.in_scope, t.is_bbp, t.description,
               a.target_ai_normalized, a.category, a.in_scope
        FROM targets_raw t
        JOIN programs p ON p.id = t.program_id
        LEFT JOIN targets_ai_enhanced a ON a.target_id = t.id
        WHERE {where_clause}
        "#
    );

    let mut stmt = conn.prepare(&query)?;
    let rows = stmt.query_map([], row_to_entry)?;
    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(crate::Error::from)
}

fn sql_escape(value: &str) -> String {
    value.replace('\'', "''")
}

fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<crate::Entry> {
    use bbscope_types::{Category, Entry, EntrySource, Platform};

    let program_url: String = row.get(0)?;
    let platform_str: String = row.get(1)?;
    let handle: String = row.get(2)?;
    let raw_target: String = row.get(3)?;
    let raw_category: String = row.get(4)?;
    let raw_in_scope = row.get::<_, i64>(5)? != 0;
    let is_bbp = row.get::<_, i64>(6)? != 0;
    let description: Option<String> = row.get(7)?;
    let ai_target: Option<String> = row.get(8)?;
    let ai_category: Option<String> = row.get(9)?;
    let ai_in_scope: Option<i64> = row.get(10)?;

    let platform = Platform::from_str_opt(&platform_str).unwrap_or(Platform::HackerOne);
    let raw_cat = Category::from_canonical_str(&raw_category).unwrap_or(Category::Other);

    let (target, category, in_scope, source) = match ai_target {
        Some(ai_target) => {
            let category = ai_category
                .and_then(|c| Category::from_canonical_str(&c))
                .unwrap_or(raw_cat);
            let in_scope = ai_in_scope.map(|v| v != 0).unwrap_or(raw_in_scope);
            (ai_target, category, in_scope, EntrySource::Ai)
        }
        None => (raw_target, raw_cat, raw_in_scope, EntrySource::Raw),
    };

    Ok(Entry {
        program_url,
        platform,
        handle,
        target,
        category,
        in_scope,
        is_bbp,
        description,
        source,
    })
}
