//! Repository layer over the in-memory inventory.
//!
//! # Responsibility
//! - Own the ordered car sequence and expose positional CRUD.
//! - Render listings used by the CLI.
//!
//! # Invariants
//! - Not-found is reported as `None`/`false`, never as an error.
//! - Insertion order is preserved; deletion shifts later indices down.

pub mod car_repo;
