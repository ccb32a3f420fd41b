//! Generic CRUD gateway and SQLite statement assembly.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over any [`Record`] table.
//! - Execute per-type named queries with typed result decoding.
//!
//! # Invariants
//! - Every statement is built from `Record::TABLE` / `Record::DATA_COLUMNS`,
//!   never from caller-supplied SQL fragments.
//! - Listing order is `id` ascending, so pagination windows are stable.
//! - Transaction boundaries are owned by the caller; the gateway never
//!   commits or rolls back on its own.

use crate::db::DbError;
use crate::model::record::{FromRow, NamedQuery, Record, RecordId};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, ToSql};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::marker::PhantomData;

pub type RepoResult<T> = Result<T, RepoError>;

/// Gateway error for record persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    NotFound(RecordId),
    AlreadyPersisted(RecordId),
    NotPersisted,
    UnknownQuery(String),
    Cardinality { query: String, rows: usize },
    InvalidPage { page: u32, page_size: u32 },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::AlreadyPersisted(id) => {
                write!(f, "record was already persisted with id {id}")
            }
            Self::NotPersisted => write!(f, "record has not been persisted yet (no id)"),
            Self::UnknownQuery(name) => write!(f, "unknown named query: `{name}`"),
            Self::Cardinality { query, rows } => write!(
                f,
                "named query `{query}` returned {rows} rows, expected exactly one"
            ),
            Self::InvalidPage { page, page_size } => write!(
                f,
                "invalid page window: page={page} page_size={page_size}, both must be >= 1"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Pagination request with 1-based page numbering.
///
/// Pagination applies only when both fields are set; a partially or fully
/// unset query returns the complete result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl PageQuery {
    /// Creates a query for one page window.
    pub fn new(page: u32, page_size: u32) -> Self {
        Self {
            page: Some(page),
            page_size: Some(page_size),
        }
    }

    /// Creates a query returning the complete result set.
    pub fn unpaged() -> Self {
        Self::default()
    }

    /// Resolves the `(limit, offset)` window, if pagination applies.
    fn window(&self) -> RepoResult<Option<(i64, i64)>> {
        match (self.page, self.page_size) {
            (Some(page), Some(page_size)) => {
                if page == 0 || page_size == 0 {
                    return Err(RepoError::InvalidPage { page, page_size });
                }
                let offset = i64::from(page - 1) * i64::from(page_size);
                Ok(Some((i64::from(page_size), offset)))
            }
            _ => Ok(None),
        }
    }
}

/// Generic persistence gateway for one record type.
///
/// Borrows the connection explicitly per instance; transaction and
/// concurrency control stay with the surrounding caller. The gateway holds
/// no record state of its own.
pub struct CrudRepository<'conn, T: Record> {
    conn: &'conn Connection,
    _record: PhantomData<T>,
}

impl<'conn, T: Record> CrudRepository<'conn, T> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            _record: PhantomData,
        }
    }

    /// Counts all records of the managed type.
    pub fn count(&self) -> RepoResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {};", T::TABLE),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }

    /// Inserts a new record and assigns its engine-generated id.
    ///
    /// # Contract
    /// - The record must not carry an id yet.
    /// - On success the assigned id is written back onto the record and
    ///   returned.
    pub fn create(&self, record: &mut T) -> RepoResult<RecordId> {
        if let Some(id) = record.id() {
            return Err(RepoError::AlreadyPersisted(id));
        }

        let mut sql = format!("INSERT INTO {} (name", T::TABLE);
        for column in T::DATA_COLUMNS {
            sql.push_str(", ");
            sql.push_str(column);
        }
        sql.push_str(") VALUES (?");
        for _ in T::DATA_COLUMNS {
            sql.push_str(", ?");
        }
        sql.push_str(");");

        let mut bind_values: Vec<Value> = vec![Value::Text(record.name().to_string())];
        bind_values.extend(record.data_values());
        self.conn.execute(&sql, params_from_iter(bind_values))?;

        let id = self.conn.last_insert_rowid();
        record.set_id(id);
        Ok(id)
    }

    /// Overwrites the stored row with the record's current field values.
    ///
    /// Returns the stored copy as re-read after the write. Fails with
    /// `NotFound` when the record's id no longer exists.
    pub fn update(&self, record: &T) -> RepoResult<T> {
        let id = record.id().ok_or(RepoError::NotPersisted)?;

        let mut sql = format!("UPDATE {} SET name = ?", T::TABLE);
        for column in T::DATA_COLUMNS {
            sql.push_str(", ");
            sql.push_str(column);
            sql.push_str(" = ?");
        }
        sql.push_str(" WHERE id = ?;");

        let mut bind_values: Vec<Value> = vec![Value::Text(record.name().to_string())];
        bind_values.extend(record.data_values());
        bind_values.push(Value::Integer(id));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        self.find(id)?.ok_or(RepoError::NotFound(id))
    }

    /// Deletes the record with the given id.
    ///
    /// Deleting an id that does not exist fails with `NotFound` instead of
    /// silently succeeding, so callers can distinguish lost updates.
    pub fn delete(&self, id: RecordId) -> RepoResult<()> {
        let changed = self.conn.execute(
            &format!("DELETE FROM {} WHERE id = ?1;", T::TABLE),
            params![id],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    /// Looks one record up by id. Absence is not an error.
    pub fn find(&self, id: RecordId) -> RepoResult<Option<T>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM {} WHERE id = ?1;",
            Self::select_columns(),
            T::TABLE
        ))?;

        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(T::from_row(row)?));
        }

        Ok(None)
    }

    /// Lists all records of the managed type, ordered by id.
    pub fn find_all(&self) -> RepoResult<Vec<T>> {
        self.find_all_paged(&PageQuery::unpaged())
    }

    /// Lists records for the requested page window, ordered by id.
    pub fn find_all_paged(&self, page: &PageQuery) -> RepoResult<Vec<T>> {
        let mut sql = format!(
            "SELECT {} FROM {} ORDER BY id ASC",
            Self::select_columns(),
            T::TABLE
        );
        let mut bind_values: Vec<Value> = Vec::new();
        push_window(&mut sql, &mut bind_values, page.window()?);

        self.query_records(&sql, bind_values)
    }

    /// Lists records whose name contains the given fragment.
    ///
    /// The match is a case-sensitive literal containment check; fragment
    /// characters are never interpreted as wildcards.
    pub fn find_by_name(&self, fragment: &str) -> RepoResult<Vec<T>> {
        self.find_by_name_paged(fragment, &PageQuery::unpaged())
    }

    /// Same containment match as [`find_by_name`](Self::find_by_name) with
    /// the standard page window rule.
    pub fn find_by_name_paged(&self, fragment: &str, page: &PageQuery) -> RepoResult<Vec<T>> {
        let mut sql = format!(
            "SELECT {} FROM {} WHERE instr(name, ?) > 0 ORDER BY id ASC",
            Self::select_columns(),
            T::TABLE
        );
        let mut bind_values: Vec<Value> = vec![Value::Text(fragment.to_string())];
        push_window(&mut sql, &mut bind_values, page.window()?);

        self.query_records(&sql, bind_values)
    }

    /// Executes a registered named query and decodes every row.
    ///
    /// The query must be registered in `T::named_queries()`. Parameters are
    /// bound by name (`:param`).
    pub fn execute_list_named_query<V: FromRow>(
        &self,
        name: &str,
        params: &[(&str, Value)],
    ) -> RepoResult<Vec<V>> {
        let query = Self::lookup_named_query(name)?;
        let mut stmt = self.conn.prepare(query.sql)?;

        let bound: Vec<(&str, &dyn ToSql)> = params
            .iter()
            .map(|(param, value)| (*param, value as &dyn ToSql))
            .collect();
        let mut rows = stmt.query(bound.as_slice())?;

        let mut results = Vec::new();
        while let Some(row) = rows.next()? {
            results.push(V::from_row(row)?);
        }

        Ok(results)
    }

    /// Executes a registered named query expected to match exactly one row.
    ///
    /// Zero or multiple matching rows fail with `Cardinality` rather than
    /// returning an absent or truncated result.
    pub fn execute_single_named_query<V: FromRow>(
        &self,
        name: &str,
        params: &[(&str, Value)],
    ) -> RepoResult<V> {
        let mut results: Vec<V> = self.execute_list_named_query(name, params)?;
        match results.len() {
            1 => Ok(results.remove(0)),
            rows => Err(RepoError::Cardinality {
                query: name.to_string(),
                rows,
            }),
        }
    }

    fn lookup_named_query(name: &str) -> RepoResult<NamedQuery> {
        T::named_queries()
            .iter()
            .find(|query| query.name == name)
            .copied()
            .ok_or_else(|| RepoError::UnknownQuery(name.to_string()))
    }

    fn query_records(&self, sql: &str, bind_values: Vec<Value>) -> RepoResult<Vec<T>> {
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(T::from_row(row)?);
        }

        Ok(records)
    }

    fn select_columns() -> String {
        let mut columns = String::from("id, name");
        for column in T::DATA_COLUMNS {
            columns.push_str(", ");
            columns.push_str(column);
        }
        columns
    }
}

fn push_window(sql: &mut String, bind_values: &mut Vec<Value>, window: Option<(i64, i64)>) {
    if let Some((limit, offset)) = window {
        sql.push_str(" LIMIT ? OFFSET ?");
        bind_values.push(Value::Integer(limit));
        bind_values.push(Value::Integer(offset));
    }
}
