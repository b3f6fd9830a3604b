//! Domain model for the car inventory.
//!
//! # Responsibility
//! - Define the record shape shared by repository, persistence and CLI.
//!
//! # Invariants
//! - Records carry no identity field; position in the inventory is identity.
//! - Availability is one boolean flag; "sold" is its logical complement.

pub mod car;
