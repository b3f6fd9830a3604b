//! In-memory car repository.
//!
//! # Responsibility
//! - Provide positional add/find/update/delete over an ordered `Vec<Car>`.
//! - Provide availability filters and make search.
//!
//! # Invariants
//! - A position is valid iff `index < count()`.
//! - Duplicates by value are allowed.
//! - Listings always print the record's real position, also when filtered.

use crate::model::car::{Car, CarUpdate};

/// Listing text for an empty inventory.
pub const NO_CARS_STORED: &str = "No Cars Stored";
/// Listing text when no car is for sale.
pub const NO_AVAILABLE_CARS: &str = "No available cars";
/// Listing text when no car is sold.
pub const NO_SOLD_CARS: &str = "No sold cars";

/// Ordered, positionally addressed car collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CarRepository {
    cars: Vec<Car>,
}

impl CarRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cars(cars: Vec<Car>) -> Self {
        Self { cars }
    }

    /// Appends a car to the end of the inventory. Always succeeds.
    pub fn add(&mut self, car: Car) -> bool {
        self.cars.push(car);
        true
    }

    pub fn count(&self) -> usize {
        self.cars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cars.is_empty()
    }

    pub fn cars(&self) -> &[Car] {
        &self.cars
    }

    pub fn is_valid_index(&self, index: usize) -> bool {
        index < self.cars.len()
    }

    /// Converts a signed operator-entered position into a valid index.
    ///
    /// Negative and out-of-range values yield `None`.
    pub fn resolve_index(&self, raw: i64) -> Option<usize> {
        usize::try_from(raw)
            .ok()
            .filter(|index| self.is_valid_index(*index))
    }

    pub fn find_by_index(&self, index: usize) -> Option<&Car> {
        self.cars.get(index)
    }

    /// Overwrites the mutable fields of the car at `index`.
    ///
    /// Returns `false` for an invalid index or a missing replacement.
    pub fn update(&mut self, index: usize, update: Option<&CarUpdate>) -> bool {
        match (self.cars.get_mut(index), update) {
            (Some(car), Some(update)) => {
                car.apply(update);
                true
            }
            _ => false,
        }
    }

    /// Removes and returns the car at `index`, shifting later cars down.
    pub fn delete(&mut self, index: usize) -> Option<Car> {
        if self.is_valid_index(index) {
            Some(self.cars.remove(index))
        } else {
            None
        }
    }

    /// Replaces the whole inventory, returning the previous contents.
    pub fn replace_all(&mut self, cars: Vec<Car>) -> Vec<Car> {
        std::mem::replace(&mut self.cars, cars)
    }

    pub fn list_all(&self) -> String {
        if self.cars.is_empty() {
            return NO_CARS_STORED.to_string();
        }
        format_indexed(self.cars.iter().enumerate())
    }

    pub fn list_available(&self) -> String {
        self.list_where(NO_AVAILABLE_CARS, |car| car.is_available)
    }

    pub fn list_sold(&self) -> String {
        self.list_where(NO_SOLD_CARS, Car::is_sold)
    }

    pub fn count_available(&self) -> usize {
        self.count_where(|car| car.is_available)
    }

    pub fn count_sold(&self) -> usize {
        self.count_where(Car::is_sold)
    }

    pub fn count_where(&self, predicate: impl Fn(&Car) -> bool) -> usize {
        self.cars.iter().filter(|car| predicate(*car)).count()
    }

    /// Renders cars matching `predicate` with their real positions.
    ///
    /// Returns [`NO_CARS_STORED`] for an empty inventory and `no_match`
    /// when the inventory is non-empty but nothing matches.
    pub fn list_where(&self, no_match: &str, predicate: impl Fn(&Car) -> bool) -> String {
        if self.cars.is_empty() {
            return NO_CARS_STORED.to_string();
        }

        let mut matches = self
            .cars
            .iter()
            .enumerate()
            .filter(|(_, car)| predicate(*car))
            .peekable();
        if matches.peek().is_none() {
            return no_match.to_string();
        }
        format_indexed(matches)
    }

    /// Case-insensitive substring search on `make`.
    ///
    /// A blank query matches nothing.
    pub fn search_by_make(&self, query: &str) -> Vec<&Car> {
        self.search_hits(query).map(|(_, car)| car).collect()
    }

    /// Renders [`Self::search_by_make`] hits with their positions.
    ///
    /// Returns an empty string when nothing matches.
    pub fn list_by_make(&self, query: &str) -> String {
        format_indexed(self.search_hits(query))
    }

    fn search_hits<'a>(&'a self, query: &str) -> impl Iterator<Item = (usize, &'a Car)> + 'a {
        let needle = query.trim().to_lowercase();
        self.cars
            .iter()
            .enumerate()
            .filter(move |(_, car)| {
                !needle.is_empty() && car.make.to_lowercase().contains(needle.as_str())
            })
    }
}

fn format_indexed<'a>(cars: impl Iterator<Item = (usize, &'a Car)>) -> String {
    cars.map(|(index, car)| format!("{index}: {car}"))
        .collect::<Vec<_>>()
        .join("\n")
}
