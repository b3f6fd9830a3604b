//! XML document adapter backed by `quick-xml` serde support.
//!
//! Layout: `<cars><car make=".." model=".." .../>...</cars>`.
//! Fields are written as attributes: element text is trimmed on read,
//! attribute values are kept byte for byte.

use super::{read_document, write_document, CarSerializer, PersistError, PersistFormat, PersistResult};
use crate::model::car::Car;
use quick_xml::se::Serializer;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";

/// On-disk shape of one `<car>` element.
#[derive(Serialize, Deserialize)]
struct XmlCar {
    #[serde(rename = "@make")]
    make: String,
    #[serde(rename = "@model")]
    model: String,
    #[serde(rename = "@engine_size")]
    engine_size: i32,
    #[serde(rename = "@price")]
    price: String,
    #[serde(rename = "@year")]
    year: String,
    #[serde(rename = "@service_date")]
    service_date: String,
    #[serde(rename = "@is_available")]
    is_available: bool,
}

impl From<&Car> for XmlCar {
    fn from(car: &Car) -> Self {
        Self {
            make: car.make.clone(),
            model: car.model.clone(),
            engine_size: car.engine_size,
            price: car.price.clone(),
            year: car.year.clone(),
            service_date: car.service_date.clone(),
            is_available: car.is_available,
        }
    }
}

impl From<XmlCar> for Car {
    fn from(car: XmlCar) -> Self {
        Car::new(
            car.make,
            car.model,
            car.engine_size,
            car.price,
            car.year,
            car.service_date,
            car.is_available,
        )
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename = "cars")]
struct CarsDocument {
    #[serde(rename = "car", default)]
    cars: Vec<XmlCar>,
}

/// Stores the inventory as one XML document with a `<car>` element per record.
#[derive(Debug, Clone)]
pub struct XmlSerializer {
    path: PathBuf,
}

impl XmlSerializer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CarSerializer for XmlSerializer {
    fn format(&self) -> PersistFormat {
        PersistFormat::Xml
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, cars: &[Car]) -> PersistResult<()> {
        let document_body = CarsDocument {
            cars: cars.iter().map(XmlCar::from).collect(),
        };

        let mut document = String::from(XML_DECLARATION);
        let mut serializer = Serializer::new(&mut document);
        serializer.indent(' ', 2);
        document_body
            .serialize(serializer)
            .map_err(|err| PersistError::Encode {
                format: PersistFormat::Xml,
                message: err.to_string(),
            })?;
        document.push('\n');
        write_document(&self.path, &document)
    }

    fn read(&self) -> PersistResult<Vec<Car>> {
        let Some(document) = read_document(&self.path)? else {
            return Ok(Vec::new());
        };

        quick_xml::de::from_str::<CarsDocument>(&document)
            .map(|parsed| parsed.cars.into_iter().map(Car::from).collect())
            .map_err(|err| PersistError::Decode {
                path: self.path.clone(),
                format: PersistFormat::Xml,
                message: err.to_string(),
            })
    }
}
