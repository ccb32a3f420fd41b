//! SQLite migration registry executor.
//!
//! # Responsibility
//! - Apply a caller-registered migration set in strictly increasing order.
//! - Mirror the applied version to `PRAGMA user_version`.
//!
//! # Invariants
//! - Registered `version` values must be strictly increasing.
//! - Pending migrations are applied atomically in one transaction.

use crate::db::{DbError, DbResult};
use rusqlite::Connection;

/// One schema step: DDL (or backfill SQL) tagged with a target version.
///
/// The registry is supplied by the application; this crate owns no schema
/// of its own.
#[derive(Debug, Clone, Copy)]
pub struct Migration {
    pub version: u32,
    pub sql: &'static str,
}

/// Returns the latest version registered in `migrations`.
pub fn latest_version(migrations: &[Migration]) -> u32 {
    migrations.last().map_or(0, |migration| migration.version)
}

/// Applies all pending migrations on the provided connection.
///
/// # Errors
/// - `NonMonotonicMigration` when registered versions do not strictly increase.
/// - `UnsupportedSchemaVersion` when the database is newer than the registry.
pub fn apply_migrations(conn: &mut Connection, migrations: &[Migration]) -> DbResult<()> {
    validate_registry(migrations)?;

    let current_version = current_user_version(conn)?;
    let latest = latest_version(migrations);

    if current_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: current_version,
            latest_supported: latest,
        });
    }

    if current_version == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for migration in migrations {
        if migration.version <= current_version {
            continue;
        }

        tx.execute_batch(migration.sql)?;
        tx.execute_batch(&format!("PRAGMA user_version = {};", migration.version))?;
    }
    tx.commit()?;

    Ok(())
}

fn validate_registry(migrations: &[Migration]) -> DbResult<()> {
    let mut previous = 0u32;
    for migration in migrations {
        if migration.version <= previous {
            return Err(DbError::NonMonotonicMigration {
                previous,
                next: migration.version,
            });
        }
        previous = migration.version;
    }
    Ok(())
}

fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}
