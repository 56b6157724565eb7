//! Checklist table definitions.
//!
//! # Invariants
//! - `rubric_items` rows belong to exactly one `checklists` row.
//! - `(checklist_id, position)` is unique.
//! - `checklists.item_count` is written once and matches its row count.

use crate::db::DbResult;
use rusqlite::Connection;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS checklists (
    id TEXT PRIMARY KEY NOT NULL,
    item_count INTEGER NOT NULL CHECK (item_count >= 0),
    last_update INTEGER NULL CHECK (last_update IS NULL OR last_update >= 0),
    revision INTEGER NOT NULL DEFAULT 0,
    created_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000),
    updated_at INTEGER NOT NULL DEFAULT (strftime('%s', 'now') * 1000)
);

CREATE TABLE IF NOT EXISTS rubric_items (
    checklist_id TEXT NOT NULL REFERENCES checklists(id) ON DELETE CASCADE,
    position INTEGER NOT NULL CHECK (position >= 0),
    title TEXT NOT NULL,
    criteria TEXT NOT NULL,
    status TEXT NOT NULL,
    PRIMARY KEY (checklist_id, position)
);
";

/// Names of tables owned by rubric core.
pub const TABLES: [&str; 2] = ["checklists", "rubric_items"];

/// Creates missing checklist tables on the provided connection.
pub fn apply_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
