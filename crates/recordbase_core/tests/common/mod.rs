//! Shared fixture record for integration tests.
#![allow(dead_code)]

use recordbase_core::db::open_db_in_memory;
use recordbase_core::{FromRow, Migration, NamedQuery, Record, RecordId};
use rusqlite::types::Value;
use rusqlite::{Connection, Row};

pub const PERSON_MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: "CREATE TABLE people (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        born_on INTEGER
    );",
}];

/// Minimal concrete record: identity, name, and one data column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    pub id: Option<RecordId>,
    pub name: String,
    /// Unix epoch milliseconds at midnight, as produced by `testdata`.
    pub born_on: Option<i64>,
}

impl Person {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            born_on: None,
        }
    }
}

impl FromRow for Person {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            born_on: row.get("born_on")?,
        })
    }
}

impl Record for Person {
    const TABLE: &'static str = "people";
    const DATA_COLUMNS: &'static [&'static str] = &["born_on"];

    fn id(&self) -> Option<RecordId> {
        self.id
    }

    fn set_id(&mut self, id: RecordId) {
        self.id = Some(id);
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_name(&mut self, name: String) {
        self.name = name;
    }

    fn data_values(&self) -> Vec<Value> {
        vec![match self.born_on {
            Some(epoch_ms) => Value::Integer(epoch_ms),
            None => Value::Null,
        }]
    }

    fn named_queries() -> &'static [NamedQuery] {
        &[
            NamedQuery {
                name: "person.born_after",
                sql: "SELECT id, name, born_on FROM people
                      WHERE born_on >= :min_born ORDER BY id ASC;",
            },
            NamedQuery {
                name: "person.by_exact_name",
                sql: "SELECT id, name, born_on FROM people
                      WHERE name = :name ORDER BY id ASC;",
            },
        ]
    }
}

pub fn open_fixture_db() -> Connection {
    open_db_in_memory(PERSON_MIGRATIONS).expect("in-memory fixture database should open")
}
