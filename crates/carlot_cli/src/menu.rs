//! Interactive menu loop.
//!
//! # Responsibility
//! - Render the numbered menus and dispatch to `CarService` operations.
//! - Report persistence failures on the error stream and keep running.
//!
//! # Invariants
//! - Only the exit option (or closed input) ends the loop.
//! - Out-of-range positions are reported, never fatal.

use crate::console::Console;
use carlot_core::{Car, CarSerializer, CarService, CarUpdate, ServiceBooking};
use log::{info, warn};
use std::io::{self, BufRead, Write};

const MAIN_MENU: &str = r"
 ----------------------------------
 |        CAR SERVICE APP         |
 ----------------------------------
 | CAR MENU                       |
 |   1) Add a Car                 |
 |   2) List Cars                 |
 |   3) Update a Car              |
 |   4) Delete a Car              |
 |   5) Search Cars by Make       |
 |   6) Book a Service            |
 ----------------------------------
 |   7) Save Cars                 |
 |   8) Load Cars                 |
 ----------------------------------
 |   0) Exit                      |
 ----------------------------------";

const LIST_MENU: &str = r"
 ----------------------------------
 |   1) View ALL cars             |
 |   2) View AVAILABLE cars       |
 |   3) View SOLD cars            |
 ----------------------------------";

const OPTION_PROMPT: &str = " ==>> ";
const NO_CAR_AT_INDEX: &str = "There are no cars for this index number";

/// Menu loop bound to one service and one console.
pub struct Menu<S: CarSerializer, R, W, E> {
    service: CarService<S>,
    console: Console<R, W, E>,
}

impl<S, R, W, E> Menu<S, R, W, E>
where
    S: CarSerializer,
    R: BufRead,
    W: Write,
    E: Write,
{
    pub fn new(service: CarService<S>, console: Console<R, W, E>) -> Self {
        Self { service, console }
    }

    pub fn into_parts(self) -> (CarService<S>, W, E) {
        let (out, err) = self.console.into_output();
        (self.service, out, err)
    }

    /// Runs until the exit option is chosen or input is closed.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            match self.step() {
                Ok(true) => continue,
                Ok(false) => return Ok(()),
                Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => {
                    warn!("event=input_closed module=cli status=ok");
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Handles one main-menu choice; `false` means exit.
    fn step(&mut self) -> io::Result<bool> {
        self.console.print(MAIN_MENU)?;
        let option = self.console.read_i64(OPTION_PROMPT)?;
        match option {
            1 => self.add_car()?,
            2 => self.list_cars()?,
            3 => self.update_car()?,
            4 => self.delete_car()?,
            5 => self.search_cars()?,
            6 => self.book_service()?,
            7 => self.save()?,
            8 => self.load()?,
            0 => {
                info!("event=app_exit module=cli status=ok");
                self.console.print("Exiting...bye")?;
                return Ok(false);
            }
            other => self
                .console
                .print(&format!("Invalid option entered: {other}"))?,
        }
        Ok(true)
    }

    fn add_car(&mut self) -> io::Result<()> {
        let make = self.console.read_line("Enter the make for the car: ")?;
        let model = self.console.read_line("Enter the model for the car: ")?;
        let engine_size = self.console.read_i32("Enter the size of the engine: ")?;
        let price = self.console.read_line("Enter a price for the car: ")?;
        let year = self.console.read_line("Enter the year of the car: ")?;
        let service_date = self.console.read_line("Enter the last service date: ")?;
        let is_available = self
            .console
            .read_yes_no("Is the car available for sale (y/n)? ")?;

        let index = self.service.add(Car::new(
            make,
            model,
            engine_size,
            price,
            year,
            service_date,
            is_available,
        ));
        self.console
            .print(&format!("Added Successfully at position {index}"))
    }

    fn list_cars(&mut self) -> io::Result<()> {
        if self.service.count() == 0 {
            return self.console.print(&self.service.list_all());
        }

        self.console.print(LIST_MENU)?;
        let option = self.console.read_i64(OPTION_PROMPT)?;
        let listing = match option {
            1 => self.service.list_all(),
            2 => self.service.list_available(),
            3 => self.service.list_sold(),
            other => format!("Invalid option entered: {other}"),
        };
        self.console.print(&listing)?;
        self.console.print(&format!(
            "Total: {} (available: {}, sold: {})",
            self.service.count(),
            self.service.count_available(),
            self.service.count_sold()
        ))
    }

    fn update_car(&mut self) -> io::Result<()> {
        self.console.print(&self.service.list_all())?;
        if self.service.count() == 0 {
            return Ok(());
        }

        let raw = self
            .console
            .read_i64("Enter the index of the car to update: ")?;
        let Some(index) = self.service.resolve_index(raw) else {
            return self.console.print(NO_CAR_AT_INDEX);
        };

        let update = CarUpdate {
            make: self.console.read_line("Enter the make for the car: ")?,
            model: self.console.read_line("Enter the model for the car: ")?,
            engine_size: self.console.read_i32("Enter the size of the engine: ")?,
            price: self.console.read_line("Enter a price for the car: ")?,
            year: self.console.read_line("Enter the year of the car: ")?,
            service_date: self.console.read_line("Enter the last service date: ")?,
        };

        if self.service.update(index, &update) {
            self.console.print("Update Successful")
        } else {
            self.console.print("Update Failed")
        }
    }

    fn delete_car(&mut self) -> io::Result<()> {
        self.console.print(&self.service.list_all())?;
        if self.service.count() == 0 {
            return Ok(());
        }

        let raw = self
            .console
            .read_i64("Enter the index of the car to delete: ")?;
        let removed = self
            .service
            .resolve_index(raw)
            .and_then(|index| self.service.delete(index));
        match removed {
            Some(car) => self
                .console
                .print(&format!("Delete Successful! Deleted car: {car}")),
            None => self.console.print(NO_CAR_AT_INDEX),
        }
    }

    fn search_cars(&mut self) -> io::Result<()> {
        let query = self.console.read_line("Enter the make to search by: ")?;
        let listing = self.service.list_by_make(&query);
        if listing.is_empty() {
            return self.console.print("No cars found");
        }
        self.console.print(&listing)
    }

    fn book_service(&mut self) -> io::Result<()> {
        let booking = ServiceBooking {
            make: self.console.read_line("Enter the make for the car: ")?,
            model: self.console.read_line("Enter the model for the car: ")?,
            engine_size: self.console.read_i32("Enter the size of the engine: ")?,
            price: self.console.read_line("Enter the service price: ")?,
            year: self.console.read_line("Enter the year of the car: ")?,
            service_date: self.console.read_line("Enter the service date: ")?,
        };

        let index = self.service.book_service(booking);
        self.console
            .print(&format!("Service booked at position {index}"))
    }

    fn save(&mut self) -> io::Result<()> {
        match self.service.store() {
            Ok(()) => self.console.print(&format!(
                "Saved {} cars to {}",
                self.service.count(),
                self.service.serializer().path().display()
            )),
            Err(err) => self
                .console
                .report(&format!("Error writing to file: {err}")),
        }
    }

    fn load(&mut self) -> io::Result<()> {
        match self.service.load() {
            Ok(count) => self.console.print(&format!(
                "Loaded {count} cars from {}",
                self.service.serializer().path().display()
            )),
            Err(err) => self
                .console
                .report(&format!("Error reading from file: {err}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Menu;
    use crate::console::Console;
    use carlot_core::{serializer_for, Car, CarService, PersistFormat};
    use std::io::Cursor;
    use std::path::Path;

    struct Session {
        service: CarService<Box<dyn carlot_core::CarSerializer>>,
        out: String,
        err: String,
    }

    fn run_with(path: &Path, cars: Vec<Car>, input: &str) -> Session {
        let mut service = CarService::new(serializer_for(PersistFormat::from_path(path), path));
        for car in cars {
            service.add(car);
        }
        let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), Vec::new());
        let mut menu = Menu::new(service, console);
        menu.run().unwrap();

        let (service, out, err) = menu.into_parts();
        Session {
            service,
            out: String::from_utf8(out).unwrap(),
            err: String::from_utf8(err).unwrap(),
        }
    }

    fn yaris(is_available: bool) -> Car {
        Car::new("Toyota", "Yaris", 1, "125.00", "2010", "2024-12-06", is_available)
    }

    fn focus() -> Car {
        Car::new("Ford", "Focus", 2, "10.00", "2014", "2024-12-10", true)
    }

    #[test]
    fn invalid_option_is_reported_and_menu_redisplayed() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_with(&dir.path().join("cars.json"), Vec::new(), "42\n0\n");

        assert!(session.out.contains("Invalid option entered: 42"));
        assert_eq!(session.out.matches("CAR SERVICE APP").count(), 2);
        assert!(session.out.ends_with("Exiting...bye\n"));
    }

    #[test]
    fn closed_input_ends_loop_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_with(&dir.path().join("cars.json"), Vec::new(), "1\nToyota\n");

        assert_eq!(session.service.count(), 0);
        assert!(!session.out.contains("Exiting"));
    }

    #[test]
    fn add_then_list_all() {
        let dir = tempfile::tempdir().unwrap();
        let input = "1\nToyota\nYaris\nbig\n1\n125.00\n2010\n2024-12-06\ny\n2\n1\n0\n";
        let session = run_with(&dir.path().join("cars.json"), Vec::new(), input);

        assert_eq!(session.service.find(0), Some(&yaris(true)));
        assert!(session.out.contains("Invalid number"));
        assert!(session.out.contains("Added Successfully at position 0"));
        assert!(session.out.contains("0: Toyota Yaris"));
        assert!(session.out.contains("Total: 1 (available: 1, sold: 0)"));
    }

    #[test]
    fn list_on_empty_inventory_skips_submenu() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_with(&dir.path().join("cars.json"), Vec::new(), "2\n0\n");

        assert!(session.out.contains("No Cars Stored"));
        assert!(!session.out.contains("View ALL cars"));
    }

    #[test]
    fn list_sold_shows_only_sold_cars() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_with(
            &dir.path().join("cars.json"),
            vec![yaris(false), focus()],
            "2\n3\n0\n",
        );

        assert!(session.out.contains("0: Toyota Yaris"));
        assert!(!session.out.contains("1: Ford Focus"));
    }

    #[test]
    fn update_overwrites_selected_car() {
        let dir = tempfile::tempdir().unwrap();
        let input = "3\n1\nFord\nFiesta\n4\n20.00\n2014\n2024-12-29\n0\n";
        let session = run_with(&dir.path().join("cars.json"), vec![yaris(true), focus()], input);

        let updated = session.service.find(1).unwrap();
        assert_eq!(updated.model, "Fiesta");
        assert_eq!(updated.engine_size, 4);
        assert!(session.out.contains("Update Successful"));
    }

    #[test]
    fn update_and_delete_reject_bad_index() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_with(&dir.path().join("cars.json"), vec![yaris(true)], "3\n5\n4\n-1\n0\n");

        assert_eq!(session.out.matches("There are no cars for this index number").count(), 2);
        assert_eq!(session.service.count(), 1);
    }

    #[test]
    fn delete_removes_car_and_shifts() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_with(&dir.path().join("cars.json"), vec![yaris(true), focus()], "4\n0\n0\n");

        assert!(session.out.contains("Delete Successful! Deleted car: Toyota Yaris"));
        assert_eq!(session.service.count(), 1);
        assert_eq!(session.service.find(0), Some(&focus()));
    }

    #[test]
    fn search_reports_hits_and_misses() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_with(
            &dir.path().join("cars.json"),
            vec![yaris(true), focus()],
            "5\nford\n5\nNissan\n0\n",
        );

        assert!(session.out.contains("1: Ford Focus"));
        assert!(session.out.contains("No cars found"));
    }

    #[test]
    fn book_service_adds_unavailable_car() {
        let dir = tempfile::tempdir().unwrap();
        let input = "6\nToyota\nYaris\n1\n125.00\n2010\n2024-12-06\n0\n";
        let session = run_with(&dir.path().join("cars.json"), Vec::new(), input);

        assert_eq!(session.service.find(0), Some(&yaris(false)));
        assert!(session.out.contains("Service booked at position 0"));
    }

    #[test]
    fn save_then_load_restores_inventory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cars.xml");

        let saved = run_with(&path, vec![yaris(false), focus()], "7\n0\n");
        assert!(saved.out.contains("Saved 2 cars to"));

        let loaded = run_with(&path, Vec::new(), "8\n0\n");
        assert!(loaded.out.contains("Loaded 2 cars from"));
        assert_eq!(loaded.service.repository().cars(), &[yaris(false), focus()]);
    }

    #[test]
    fn persistence_errors_go_to_error_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cars.json");
        std::fs::write(&path, "not json").unwrap();

        let session = run_with(&path, vec![focus()], "8\n0\n");

        assert!(session.err.contains("Error reading from file"));
        assert_eq!(session.service.count(), 1);
        assert!(session.out.ends_with("Exiting...bye\n"));
    }
}
