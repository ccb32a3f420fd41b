//! Record contract shared by all persisted types.
//!
//! # Responsibility
//! - Define the identity-bearing record trait the persistence layer manages.
//! - Provide identity-based equality helpers for hash-based containers.
//!
//! # Invariants
//! - Every record is identified by an engine-assigned `RecordId` after
//!   creation, and by nothing before it.

pub mod record;
