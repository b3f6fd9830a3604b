//! Car record model.
//!
//! # Responsibility
//! - Define the canonical inventory record and its display form.
//! - Define the field set an update is allowed to overwrite.
//!
//! # Invariants
//! - `is_available == true` means the car is for sale.
//! - `is_sold()` is always `!is_available`; there is no third state.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// One inventory entry.
///
/// Price, year and service date are kept as display strings, exactly as the
/// operator typed them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Car {
    pub make: String,
    pub model: String,
    pub engine_size: i32,
    pub price: String,
    pub year: String,
    pub service_date: String,
    /// `true` = for sale, `false` = sold or in service.
    pub is_available: bool,
}

impl Car {
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        engine_size: i32,
        price: impl Into<String>,
        year: impl Into<String>,
        service_date: impl Into<String>,
        is_available: bool,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            engine_size,
            price: price.into(),
            year: year.into(),
            service_date: service_date.into(),
            is_available,
        }
    }

    /// Returns whether this car is sold or otherwise off the lot.
    pub fn is_sold(&self) -> bool {
        !self.is_available
    }

    /// Overwrites the mutable fields with values from `update`.
    ///
    /// Availability is left untouched.
    pub fn apply(&mut self, update: &CarUpdate) {
        self.make.clone_from(&update.make);
        self.model.clone_from(&update.model);
        self.engine_size = update.engine_size;
        self.price.clone_from(&update.price);
        self.year.clone_from(&update.year);
        self.service_date.clone_from(&update.service_date);
    }

    fn availability_label(&self) -> &'static str {
        if self.is_available {
            "available"
        } else {
            "sold"
        }
    }
}

impl Display for Car {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} ({}) engine={} price={} service_date={} [{}]",
            self.make,
            self.model,
            self.year,
            self.engine_size,
            self.price,
            self.service_date,
            self.availability_label()
        )
    }
}

/// Replacement values for an in-place update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarUpdate {
    pub make: String,
    pub model: String,
    pub engine_size: i32,
    pub price: String,
    pub year: String,
    pub service_date: String,
}

impl From<&Car> for CarUpdate {
    fn from(car: &Car) -> Self {
        Self {
            make: car.make.clone(),
            model: car.model.clone(),
            engine_size: car.engine_size,
            price: car.price.clone(),
            year: car.year.clone(),
            service_date: car.service_date.clone(),
        }
    }
}
