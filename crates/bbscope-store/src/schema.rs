use rusqlite::Connection;

use crate::Result;

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        PRAGMA foreign_keys = ON;

        CREATE TABLE IF NOT EXISTS programs (
            id INTEGER PRIMARY KEY,
            platform TEXT NOT NULL,
            handle TEXT NOT NULL,
            url TEXT NOT NULL UNIQUE,
            first_seen_at TEXT NOT NULL,
            last_seen_at TEXT NOT NULL,
            disabled INTEGER NOT NULL DEFAULT 0,
            is_ignored INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS targets_raw (
            id INTEGER PRIMARY KEY,
            program_id INTEGER NOT NULL REFERENCES programs(id),
            target TEXT NOT NULL,
            category TEXT NOT NULL,
            description TEXT,
            in_scope INTEGER NOT NULL,
            is_bbp INTEGER NOT NULL,
            first_seen_at TEXT NOT NULL,
            last_seen_at TEXT NOT NULL,
            UNIQUE(program_id, category, target)
        );

        CREATE TABLE IF NOT EXISTS targets_ai_enhanced (
            id INTEGER PRIMARY KEY,
            target_id INTEGER NOT NULL REFERENCES targets_raw(id) ON DELETE CASCADE,
            target_ai_normalized TEXT NOT NULL,
            category TEXT,
            in_scope INTEGER,
            first_seen_at TEXT NOT NULL,
            last_seen_at TEXT NOT NULL,
            UNIQUE(target_id, target_ai_normalized)
        );

        CREATE TABLE IF NOT EXISTS scope_changes (
            id INTEGER PRIMARY KEY,
            occurred_at TEXT NOT NULL,
            program_url TEXT NOT NULL,
            platform TEXT NOT NULL,
            handle TEXT NOT NULL,
            target_normalized TEXT NOT NULL,
            target_raw TEXT NOT NULL,
            target_ai_normalized TEXT,
            category TEXT NOT NULL,
            in_scope INTEGER NOT NULL,
            is_bbp INTEGER NOT NULL,
            change_type TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_programs_platform ON programs(platform);
        CREATE INDEX IF NOT EXISTS idx_programs_url ON programs(url);
        CREATE INDEX IF NOT EXISTS idx_targets_raw_program ON targets_raw(program_id);
        CREATE INDEX IF NOT EXISTS idx_targets_ai_target ON targets_ai_enhanced(target_id);
        CREATE INDEX IF NOT EXISTS idx_scope_changes_occurred ON scope_changes(occurred_at);
        CREATE INDEX IF NOT EXISTS idx_scope_changes_program_occurred ON scope_changes(program_url, occurred_at);
        "#,
    )?;

    Ok(())
}
