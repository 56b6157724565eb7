use rubric_core::db::schema::{apply_schema, TABLES};
use rubric_core::db::{open_db, open_db_in_memory};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_checklist_tables() {
    let conn = open_db_in_memory().unwrap();

    for table in TABLES {
        assert_table_exists(&conn, table);
    }
    let foreign_keys: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(foreign_keys, 1);
}

#[test]
fn opening_same_database_twice_keeps_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rubric.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute(
            "INSERT INTO checklists (id, item_count, last_update, revision) VALUES ('c1', 0, NULL, 0);",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    apply_schema(&conn_second).unwrap();
    let count: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM checklists;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 1);
}

#[test]
fn rubric_items_require_existing_checklist() {
    let conn = open_db_in_memory().unwrap();

    let result = conn.execute(
        "INSERT INTO rubric_items (checklist_id, position, title, criteria, status)
         VALUES ('missing', 0, 'title', '', 'Undetermined');",
        [],
    );
    assert!(result.is_err());
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
