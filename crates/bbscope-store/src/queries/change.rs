use bbscope_types::{ChangeType, Platform, ScopeChange};
use rusqlite::{params, Connection};

use crate::Result;

pub fn insert(conn: &Connection, change: &ScopeChange) -> Result<()> {
    conn.execute(
        r#"
        INSERT INTO scope_changes
            (occurred_at, program_url, platform, handle, target_normalized, target_raw,
             target_ai_normalized, category, in_scope, is_bbp, change_type)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
        "#,
        params![
            change.occurred_at,
            change.program_url,
            change.platform.as_str(),
            change.handle,
            change.target_normalized,
            change.target_raw,
            change.target_ai_normalized,
            change.category,
            change.in_scope as i64,
            change.is_bbp as i64,
            change.change_type.as_str(),
        ],
    )?;
    Ok(())
}

pub fn list_recent(conn: &Connection, limit: usize) -> Result<Vec<ScopeChange>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT occurred_at, program_url, platform, handle, target_normalized, target_raw,
               target_ai_normalized, category, in_scope, is_bbp, change_type
        FROM scope_changes
        ORDER BY occurred_at DESC, id DESC
        LIMIT ?1
        "#,
    )?;
    let rows = stmt
        .query_map([limit as i64], row_to_change)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

fn row_to_change(row: &rusqlite::Row) -> rusqlite::Result<ScopeChange> {
    let platform_str: String = row.get(2)?;
    let change_type_str: String = row.get(10)?;
    Ok(ScopeChange {
        occurred_at: row.get(0)?,
        program_url: row.get(1)?,
        platform: Platform::from_str_opt(&platform_str).unwrap_or(Platform::HackerOne),
        handle: row.get(3)?,
        target_normalized: row.get(4)?,
        target_raw: row.get(5)?,
        target_ai_normalized: row.get(6)?,
        category: row.get(7)?,
        in_scope: row.get::<_, i64>(8)? != 0,
        is_bbp: row.get::<_, i64>(9)? != 0,
        change_type: match change_type_str.as_str() {
            "added" => ChangeType::Added,
            "removed" => ChangeType::Removed,
            _ => ChangeType::Updated,
        },
    })
}
