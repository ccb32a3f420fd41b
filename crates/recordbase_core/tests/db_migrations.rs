mod common;

use common::PERSON_MIGRATIONS;
use recordbase_core::db::{latest_version, open_db, open_db_in_memory, DbError, Migration};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory(PERSON_MIGRATIONS).unwrap();

    assert_eq!(schema_version(&conn), latest_version(PERSON_MIGRATIONS));
    assert_table_exists(&conn, "people");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.db");

    let conn_first = open_db(&path, PERSON_MIGRATIONS).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version(PERSON_MIGRATIONS));
    drop(conn_first);

    let conn_second = open_db(&path, PERSON_MIGRATIONS).unwrap();
    assert_eq!(
        schema_version(&conn_second),
        latest_version(PERSON_MIGRATIONS)
    );
    assert_table_exists(&conn_second, "people");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path, PERSON_MIGRATIONS).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version(PERSON_MIGRATIONS));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_monotonic_registry_is_rejected() {
    const OUT_OF_ORDER: &[Migration] = &[
        Migration {
            version: 2,
            sql: "CREATE TABLE later (id INTEGER PRIMARY KEY);",
        },
        Migration {
            version: 1,
            sql: "CREATE TABLE earlier (id INTEGER PRIMARY KEY);",
        },
    ];

    let err = open_db_in_memory(OUT_OF_ORDER).unwrap_err();
    assert!(matches!(
        err,
        DbError::NonMonotonicMigration {
            previous: 2,
            next: 1
        }
    ));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
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
