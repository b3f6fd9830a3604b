//! Whole-inventory persistence adapters.
//!
//! # Responsibility
//! - Define the serializer contract used by the service layer.
//! - Provide JSON and XML file-backed implementations.
//!
//! # Invariants
//! - `write` replaces the target file with the full sequence, in order.
//! - `read` on a missing or blank file yields an empty sequence.
//! - The format is fixed for a serializer's lifetime.

use crate::model::car::Car;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

mod json;
mod xml;

pub use json::JsonSerializer;
pub use xml::XmlSerializer;

pub type PersistResult<T> = Result<T, PersistError>;

/// On-disk representation of the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistFormat {
    Json,
    Xml,
}

impl PersistFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }

    /// Default data file name for this format.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Self::Json => "cars.json",
            Self::Xml => "cars.xml",
        }
    }

    /// Infers the format from a file extension. Anything but `.xml` is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("xml") => Self::Xml,
            _ => Self::Json,
        }
    }
}

impl Display for PersistFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersistFormat {
    type Err = PersistError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            other => Err(PersistError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Persistence failure for load/store.
#[derive(Debug)]
pub enum PersistError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// File content is not a valid inventory document.
    Decode {
        path: PathBuf,
        format: PersistFormat,
        message: String,
    },
    Encode {
        format: PersistFormat,
        message: String,
    },
    UnsupportedFormat(String),
}

impl Display for PersistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "i/o error on `{}`: {source}", path.display()),
            Self::Decode {
                path,
                format,
                message,
            } => write!(
                f,
                "invalid {format} inventory in `{}`: {message}",
                path.display()
            ),
            Self::Encode { format, message } => {
                write!(f, "failed to encode inventory as {format}: {message}")
            }
            Self::UnsupportedFormat(value) => {
                write!(f, "unsupported format `{value}`; expected json|xml")
            }
        }
    }
}

impl Error for PersistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Decode { .. } => None,
            Self::Encode { .. } => None,
            Self::UnsupportedFormat(_) => None,
        }
    }
}

/// Serializer contract for the whole car sequence.
pub trait CarSerializer {
    fn format(&self) -> PersistFormat;
    fn path(&self) -> &Path;
    fn write(&self, cars: &[Car]) -> PersistResult<()>;
    fn read(&self) -> PersistResult<Vec<Car>>;
}

impl<T: CarSerializer + ?Sized> CarSerializer for Box<T> {
    fn format(&self) -> PersistFormat {
        (**self).format()
    }

    fn path(&self) -> &Path {
        (**self).path()
    }

    fn write(&self, cars: &[Car]) -> PersistResult<()> {
        (**self).write(cars)
    }

    fn read(&self) -> PersistResult<Vec<Car>> {
        (**self).read()
    }
}

/// Builds the serializer for `format` bound to `path`.
pub fn serializer_for(format: PersistFormat, path: impl Into<PathBuf>) -> Box<dyn CarSerializer> {
    match format {
        PersistFormat::Json => Box::new(JsonSerializer::new(path)),
        PersistFormat::Xml => Box::new(XmlSerializer::new(path)),
    }
}

/// Reads `path`, mapping a missing or whitespace-only file to `None`.
fn read_document(path: &Path) -> PersistResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) if text.trim().is_empty() => Ok(None),
        Ok(text) => Ok(Some(text)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(PersistError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_document(path: &Path, document: &str) -> PersistResult<()> {
    std::fs::write(path, document).map_err(|source| PersistError::Io {
        path: path.to_path_buf(),
        source,
    })
}
