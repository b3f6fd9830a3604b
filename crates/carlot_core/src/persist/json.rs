//! JSON array adapter backed by `serde_json`.

use super::{read_document, write_document, CarSerializer, PersistError, PersistFormat, PersistResult};
use crate::model::car::Car;
use std::path::{Path, PathBuf};

/// Stores the inventory as a pretty-printed JSON array of car objects.
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    path: PathBuf,
}

impl JsonSerializer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CarSerializer for JsonSerializer {
    fn format(&self) -> PersistFormat {
        PersistFormat::Json
    }

    fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, cars: &[Car]) -> PersistResult<()> {
        let document = serde_json::to_string_pretty(cars).map_err(|err| PersistError::Encode {
            format: PersistFormat::Json,
            message: err.to_string(),
        })?;
        write_document(&self.path, &document)
    }

    fn read(&self) -> PersistResult<Vec<Car>> {
        let Some(document) = read_document(&self.path)? else {
            return Ok(Vec::new());
        };

        serde_json::from_str(&document).map_err(|err| PersistError::Decode {
            path: self.path.clone(),
            format: PersistFormat::Json,
            message: err.to_string(),
        })
    }
}
