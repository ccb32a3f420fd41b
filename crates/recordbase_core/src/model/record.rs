//! Identity-bearing record contract.
//!
//! # Responsibility
//! - Define the storage metadata and accessors every persisted type supplies.
//! - Keep identity comparison semantics in one place.
//!
//! # Invariants
//! - `id` is `None` until the storage engine assigns it, exactly once.
//! - Two records are the same iff both carry an id and the ids match;
//!   records without an id only match themselves (pointer identity).

use rusqlite::types::Value;
use rusqlite::Row;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};

/// Engine-assigned numeric identity, compatible with the SQLite rowid.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = i64;

/// Typed row decoding contract.
///
/// Every query result — managed records and named-query projections alike —
/// is decoded through this trait at the call site, so no untyped results
/// cross the persistence boundary.
pub trait FromRow: Sized {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
}

/// A predefined query registered under a stable name.
///
/// SQL may reference named parameters (`:param`) bound at execution time.
#[derive(Debug, Clone, Copy)]
pub struct NamedQuery {
    pub name: &'static str,
    pub sql: &'static str,
}

/// Contract every persisted record type implements.
///
/// # Contract
/// - The backing table exposes an `INTEGER PRIMARY KEY` column `id` and a
///   `TEXT` column `name`; `DATA_COLUMNS` lists the remaining columns.
/// - `data_values()` returns bind values parallel to `DATA_COLUMNS`.
/// - `set_id` is called by the persistence layer during creation and is not
///   meant to be called by application code afterwards.
pub trait Record: FromRow {
    /// Table managed for this record type. One table per type.
    const TABLE: &'static str;

    /// Columns besides `id` and `name`, in declaration order.
    const DATA_COLUMNS: &'static [&'static str];

    fn id(&self) -> Option<RecordId>;
    fn set_id(&mut self, id: RecordId);
    fn name(&self) -> &str;
    fn set_name(&mut self, name: String);

    /// Bind values for `DATA_COLUMNS`, in the same order.
    fn data_values(&self) -> Vec<Value>;

    /// Predefined queries executable through the persistence layer.
    fn named_queries() -> &'static [NamedQuery] {
        &[]
    }
}

/// Identity comparison for two records of the same type.
///
/// Returns `true` when both records carry an id and the ids are equal,
/// regardless of other field values. Records without an id fall back to
/// pointer identity, so an unsaved record only equals itself.
pub fn same_record<T: Record>(a: &T, b: &T) -> bool {
    match (a.id(), b.id()) {
        (Some(a_id), Some(b_id)) => a_id == b_id,
        _ => std::ptr::eq(a, b),
    }
}

/// Borrow wrapper keying hash-based containers by record identity.
///
/// `Eq`/`Hash` stay consistent with [`same_record`]: persisted records hash
/// by id, unsaved records hash by address. Intended for short-lived lookup
/// sets/maps over borrowed records.
pub struct IdentityKey<'a, T: Record>(pub &'a T);

impl<T: Record> PartialEq for IdentityKey<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        same_record(self.0, other.0)
    }
}

impl<T: Record> Eq for IdentityKey<'_, T> {}

impl<T: Record> Hash for IdentityKey<'_, T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self.0.id() {
            Some(id) => id.hash(state),
            None => (self.0 as *const T as usize).hash(state),
        }
    }
}

impl<T: Record + Debug> Debug for IdentityKey<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IdentityKey").field(self.0).finish()
    }
}
