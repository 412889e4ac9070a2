use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::records::AiVariantRow;
use crate::Result;

const SELECT_COLUMNS: &str =
    "id, target_id, target_ai_normalized, category, in_scope, first_seen_at, last_seen_at";

fn row_to_variant(row: &rusqlite::Row) -> rusqlite::Result<AiVariantRow> {
    Ok(AiVariantRow {
        id: row.get(0)?,
        target_id: row.get(1)?,
        target_ai_normalized: row.get(2)?,
        category: row.get(3)?,
        in_scope: row.get::<_, Option<i64>>(4)?.map(|v| v != 0),
        first_seen_at: row.get(5)?,
        last_seen_at: row.get(6)?,
    })
}

pub fn list_for_target(conn: &Connection, target_id: i64) -> Result<Vec<AiVariantRow>> {
    let query = format!("SELECT {SELECT_COLUMNS} FROM targets_ai_enhanced WHERE target_id = ?1");
    let mut stmt = conn.prepare(&query)?;
    let rows = stmt
        .query_map([target_id], row_to_variant)?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn insert(
    conn: &Connection,
    target_id: i64,
    target_ai_normalized: &str,
    category: Option<&str>,
    in_scope: Option<bool>,
    now: DateTime<Utc>,
) -> Result<i64> {
    conn.execute(
        r#"
        INSERT INTO targets_ai_enhanced
            (target_id, target_ai_normalized, category, in_scope, first_seen_at, last_seen_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?5)
        "#,
        params![
            target_id,
            target_ai_normalized,
            category,
            in_scope.map(|v| v as i64),
            now
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn update(
    conn: &Connection,
    id: i64,
    category: Option<&str>,
    in_scope: Option<bool>,
    now: DateTime<Utc>,
) -> Result<()> {
    conn.execute(
        "UPDATE targets_ai_enhanced SET category = ?2, in_scope = ?3, last_seen_at = ?4 WHERE id = ?1",
        params![id, category, in_scope.map(|v| v as i64), now],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM targets_ai_enhanced WHERE id = ?1", [id])?;
    Ok(())
}
