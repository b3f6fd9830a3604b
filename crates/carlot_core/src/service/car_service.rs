//! Car inventory use-case service.
//!
//! # Responsibility
//! - Provide the operator-facing CRUD, search and persistence entry points.
//! - Emit one structured log event per mutation or persistence call.
//!
//! # Invariants
//! - A failed `load` leaves the current inventory untouched.
//! - A failed `store` does not modify the inventory.
//! - Booked services are created as not available.

use crate::logging::sanitize_message;
use crate::model::car::{Car, CarUpdate};
use crate::persist::{CarSerializer, PersistResult};
use crate::repo::car_repo::CarRepository;
use log::{error, info, warn};
use std::time::Instant;

const MAX_LOGGED_QUERY_CHARS: usize = 64;

/// Request model for booking a car in for service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceBooking {
    pub make: String,
    pub model: String,
    pub engine_size: i32,
    pub price: String,
    pub year: String,
    pub service_date: String,
}

impl From<ServiceBooking> for Car {
    fn from(booking: ServiceBooking) -> Self {
        Car::new(
            booking.make,
            booking.model,
            booking.engine_size,
            booking.price,
            booking.year,
            booking.service_date,
            false,
        )
    }
}

/// Inventory service over one repository and one serializer.
pub struct CarService<S: CarSerializer> {
    repo: CarRepository,
    serializer: S,
}

impl<S: CarSerializer> CarService<S> {
    /// Creates a service with an empty inventory.
    pub fn new(serializer: S) -> Self {
        Self::with_repository(CarRepository::new(), serializer)
    }

    pub fn with_repository(repo: CarRepository, serializer: S) -> Self {
        Self { repo, serializer }
    }

    pub fn repository(&self) -> &CarRepository {
        &self.repo
    }

    pub fn serializer(&self) -> &S {
        &self.serializer
    }

    /// Appends a car; returns its position.
    pub fn add(&mut self, car: Car) -> usize {
        self.repo.add(car);
        let index = self.repo.count() - 1;
        info!("event=car_add module=service status=ok index={index}");
        index
    }

    /// Books a car in for service; the car is stored as not available.
    pub fn book_service(&mut self, booking: ServiceBooking) -> usize {
        let service_date = sanitize_message(&booking.service_date, MAX_LOGGED_QUERY_CHARS);
        let index = self.add(booking.into());
        info!("event=service_booked module=service status=ok index={index} service_date={service_date}");
        index
    }

    pub fn count(&self) -> usize {
        self.repo.count()
    }

    pub fn find(&self, index: usize) -> Option<&Car> {
        self.repo.find_by_index(index)
    }

    /// See [`CarRepository::resolve_index`].
    pub fn resolve_index(&self, raw: i64) -> Option<usize> {
        self.repo.resolve_index(raw)
    }

    pub fn update(&mut self, index: usize, update: &CarUpdate) -> bool {
        let updated = self.repo.update(index, Some(update));
        if updated {
            info!("event=car_update module=service status=ok index={index}");
        } else {
            warn!("event=car_update module=service status=not_found index={index}");
        }
        updated
    }

    pub fn delete(&mut self, index: usize) -> Option<Car> {
        let removed = self.repo.delete(index);
        match removed {
            Some(_) => info!(
                "event=car_delete module=service status=ok index={index} remaining={}",
                self.repo.count()
            ),
            None => warn!("event=car_delete module=service status=not_found index={index}"),
        }
        removed
    }

    pub fn list_all(&self) -> String {
        self.repo.list_all()
    }

    pub fn list_available(&self) -> String {
        self.repo.list_available()
    }

    pub fn list_sold(&self) -> String {
        self.repo.list_sold()
    }

    pub fn count_available(&self) -> usize {
        self.repo.count_available()
    }

    pub fn count_sold(&self) -> usize {
        self.repo.count_sold()
    }

    pub fn search_by_make(&self, query: &str) -> Vec<&Car> {
        let hits = self.repo.search_by_make(query);
        info!(
            "event=car_search module=service status=ok query={} hits={}",
            sanitize_message(query, MAX_LOGGED_QUERY_CHARS),
            hits.len()
        );
        hits
    }

    /// Renders make search hits; an empty string means no match.
    pub fn list_by_make(&self, query: &str) -> String {
        let listing = self.repo.list_by_make(query);
        info!(
            "event=car_search module=service status=ok query={} hits={}",
            sanitize_message(query, MAX_LOGGED_QUERY_CHARS),
            listing.lines().count()
        );
        listing
    }

    /// Writes the whole inventory through the serializer.
    pub fn store(&self) -> PersistResult<()> {
        let started_at = Instant::now();
        let format = self.serializer.format();
        let path = self.serializer.path().display().to_string();

        match self.serializer.write(self.repo.cars()) {
            Ok(()) => {
                info!(
                    "event=inventory_store module=service status=ok format={format} path={path} count={} duration_ms={}",
                    self.repo.count(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=inventory_store module=service status=error format={format} path={path} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    /// Replaces the inventory with the serializer's content.
    ///
    /// Returns the number of loaded cars. On error the inventory is unchanged.
    pub fn load(&mut self) -> PersistResult<usize> {
        let started_at = Instant::now();
        let format = self.serializer.format();
        let path = self.serializer.path().display().to_string();

        match self.serializer.read() {
            Ok(cars) => {
                let loaded = cars.len();
                let previous = self.repo.replace_all(cars);
                info!(
                    "event=inventory_load module=service status=ok format={format} path={path} count={loaded} replaced={} duration_ms={}",
                    previous.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(loaded)
            }
            Err(err) => {
                error!(
                    "event=inventory_load module=service status=error format={format} path={path} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CarService, ServiceBooking};
    use crate::model::car::{Car, CarUpdate};
    use crate::persist::{CarSerializer, PersistError, PersistFormat, PersistResult};
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    /// Serializer double that records writes and can be told to fail.
    struct MemorySerializer {
        path: PathBuf,
        stored: RefCell<Vec<Car>>,
        fail: bool,
    }

    impl MemorySerializer {
        fn new(stored: Vec<Car>, fail: bool) -> Self {
            Self {
                path: PathBuf::from("memory.json"),
                stored: RefCell::new(stored),
                fail,
            }
        }

        fn failure(&self) -> PersistError {
            PersistError::Decode {
                path: self.path.clone(),
                format: PersistFormat::Json,
                message: "simulated".to_string(),
            }
        }
    }

    impl CarSerializer for MemorySerializer {
        fn format(&self) -> PersistFormat {
            PersistFormat::Json
        }

        fn path(&self) -> &Path {
            &self.path
        }

        fn write(&self, cars: &[Car]) -> PersistResult<()> {
            if self.fail {
                return Err(self.failure());
            }
            *self.stored.borrow_mut() = cars.to_vec();
            Ok(())
        }

        fn read(&self) -> PersistResult<Vec<Car>> {
            if self.fail {
                return Err(self.failure());
            }
            Ok(self.stored.borrow().clone())
        }
    }

    fn car(make: &str) -> Car {
        Car::new(make, "Model", 1, "10.00", "2020", "2024-12-01", true)
    }

    fn booking() -> ServiceBooking {
        ServiceBooking {
            make: "Servicing Car".to_string(),
            model: "Toyota Yaris".to_string(),
            engine_size: 1,
            price: "125.00".to_string(),
            year: "2010".to_string(),
            service_date: "2024-12-06".to_string(),
        }
    }

    #[test]
    fn book_service_adds_unavailable_car() {
        let mut service = CarService::new(MemorySerializer::new(Vec::new(), false));
        service.add(car("Ford"));

        let index = service.book_service(booking());

        assert_eq!(index, 1);
        let booked = service.find(index).unwrap();
        assert!(booked.is_sold());
        assert_eq!(booked.service_date, "2024-12-06");
        assert_eq!(service.count_sold(), 1);
        assert_eq!(service.count_available(), 1);
    }

    #[test]
    fn failed_load_keeps_existing_inventory() {
        let mut service = CarService::new(MemorySerializer::new(Vec::new(), true));
        service.add(car("Toyota"));

        assert!(service.load().is_err());
        assert_eq!(service.count(), 1);
        assert_eq!(service.find(0).unwrap().make, "Toyota");
    }

    #[test]
    fn failed_store_keeps_existing_inventory() {
        let mut service = CarService::new(MemorySerializer::new(Vec::new(), true));
        service.add(car("Toyota"));

        assert!(service.store().is_err());
        assert_eq!(service.count(), 1);
    }

    #[test]
    fn load_replaces_inventory_wholesale() {
        let stored = vec![car("Nissan"), car("Volkswagen")];
        let mut service = CarService::new(MemorySerializer::new(stored.clone(), false));
        service.add(car("Toyota"));

        assert_eq!(service.load().unwrap(), 2);
        assert_eq!(service.repository().cars(), stored.as_slice());
    }

    #[test]
    fn store_writes_every_car_in_order() {
        let mut service = CarService::new(MemorySerializer::new(Vec::new(), false));
        service.add(car("Toyota"));
        service.add(car("Ford"));

        service.store().unwrap();

        let stored = service.serializer().stored.borrow().clone();
        assert_eq!(stored, vec![car("Toyota"), car("Ford")]);
    }

    #[test]
    fn list_by_make_renders_hits_or_nothing() {
        let mut service = CarService::new(MemorySerializer::new(Vec::new(), false));
        service.add(car("Toyota"));
        service.add(car("Ford"));
        service.add(car("toyota"));

        let listing = service.list_by_make("TOYOTA");
        assert_eq!(listing.lines().count(), 2);
        assert!(listing.starts_with("0: Toyota"));
        assert!(listing.contains("2: toyota"));
        assert!(service.list_by_make("Nissan").is_empty());
    }

    #[test]
    fn update_and_delete_report_invalid_index() {
        let mut service = CarService::new(MemorySerializer::new(Vec::new(), false));
        let update = CarUpdate::from(&car("Ford"));

        assert!(!service.update(0, &update));
        assert!(service.delete(0).is_none());
    }
}
