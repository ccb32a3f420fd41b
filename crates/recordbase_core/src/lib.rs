//! Generic CRUD persistence core over embedded SQLite.
//! This crate is the single source of truth for record identity and
//! persistence semantics.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod testdata;

pub use db::{
    apply_migrations, latest_version, open_db, open_db_in_memory, DbError, DbResult, Migration,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::record::{same_record, FromRow, IdentityKey, NamedQuery, Record, RecordId};
pub use repo::crud_repo::{CrudRepository, PageQuery, RepoError, RepoResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
