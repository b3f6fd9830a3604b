//! Core domain logic for the car inventory manager.
//! This crate is the single source of truth for inventory invariants.

pub mod logging;
pub mod model;
pub mod persist;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::car::{Car, CarUpdate};
pub use persist::{
    serializer_for, CarSerializer, JsonSerializer, PersistError, PersistFormat, PersistResult,
    XmlSerializer,
};
pub use repo::car_repo::{CarRepository, NO_AVAILABLE_CARS, NO_CARS_STORED, NO_SOLD_CARS};
pub use service::car_service::{CarService, ServiceBooking};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
