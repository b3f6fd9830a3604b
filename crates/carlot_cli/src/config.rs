//! Command-line configuration.
//!
//! # Responsibility
//! - Parse process arguments into storage and logging settings.
//! - Resolve the data file format from flags or the file extension.

use carlot_core::PersistFormat;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

const DEFAULT_LOG_DIR_NAME: &str = "carlot-logs";

#[derive(Parser, Debug)]
#[command(name = "carlot")]
#[command(about = "Car inventory manager with JSON/XML persistence")]
#[command(version)]
pub struct Cli {
    /// Data file used by save/load
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Data file format (inferred from the file extension when omitted)
    #[arg(long, value_enum)]
    pub format: Option<FormatArg>,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, default_value_t = carlot_core::default_log_level())]
    pub log_level: LevelFilter,

    /// Absolute directory for rolling log files
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormatArg {
    Json,
    Xml,
}

impl From<FormatArg> for PersistFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => PersistFormat::Json,
            FormatArg::Xml => PersistFormat::Xml,
        }
    }
}

/// Resolved persistence target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    pub format: PersistFormat,
    pub path: PathBuf,
}

impl Cli {
    pub fn storage(&self) -> StorageConfig {
        let explicit = self.format.map(PersistFormat::from);
        match (&self.file, explicit) {
            (Some(path), Some(format)) => StorageConfig {
                format,
                path: path.clone(),
            },
            (Some(path), None) => StorageConfig {
                format: PersistFormat::from_path(path),
                path: path.clone(),
            },
            (None, format) => {
                let format = format.unwrap_or(PersistFormat::Json);
                StorageConfig {
                    format,
                    path: PathBuf::from(format.default_file_name()),
                }
            }
        }
    }

    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use carlot_core::PersistFormat;
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("carlot").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults_to_json_file() {
        let storage = parse(&[]).storage();
        assert_eq!(storage.format, PersistFormat::Json);
        assert_eq!(storage.path, PathBuf::from("cars.json"));
    }

    #[test]
    fn format_flag_picks_default_file_name() {
        let storage = parse(&["--format", "xml"]).storage();
        assert_eq!(storage.format, PersistFormat::Xml);
        assert_eq!(storage.path, PathBuf::from("cars.xml"));
    }

    #[test]
    fn file_extension_is_used_without_format_flag() {
        let storage = parse(&["--file", "/tmp/lot.xml"]).storage();
        assert_eq!(storage.format, PersistFormat::Xml);
    }

    #[test]
    fn explicit_format_wins_over_extension() {
        let storage = parse(&["-f", "lot.xml", "--format", "json"]).storage();
        assert_eq!(storage.format, PersistFormat::Json);
        assert_eq!(storage.path, PathBuf::from("lot.xml"));
    }

    #[test]
    fn log_dir_defaults_under_temp_dir() {
        let cli = parse(&[]);
        assert!(cli.log_dir().starts_with(std::env::temp_dir()));
        assert_eq!(cli.log_level, carlot_core::default_log_level());
    }

    #[test]
    fn log_level_parses_case_insensitively() {
        assert_eq!(parse(&["--log-level", "WARN"]).log_level, log::LevelFilter::Warn);
        assert!(Cli::try_parse_from(["carlot", "--log-level", "loud"]).is_err());
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Cli::try_parse_from(["carlot", "--format", "yaml"]).is_err());
    }
}
