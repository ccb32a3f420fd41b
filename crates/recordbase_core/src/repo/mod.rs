//! Persistence gateway over SQLite record storage.
//!
//! # Responsibility
//! - Provide generic CRUD, listing and named-query APIs per record type.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - One gateway instance manages exactly one record type (enforced by the
//!   type parameter).
//! - Gateway APIs return semantic errors (`NotFound`, `Cardinality`) in
//!   addition to DB transport errors.

pub mod crud_repo;
