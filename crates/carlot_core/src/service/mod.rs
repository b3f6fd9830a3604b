//! Use-case services for the inventory.
//!
//! # Responsibility
//! - Combine the in-memory repository with a persistence adapter.
//! - Keep the CLI decoupled from storage details.

pub mod car_service;
