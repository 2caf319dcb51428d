//! # Configuration
//!
//! coursedesk configuration is loaded with [`confique`], layering environment
//! variables over a TOML file over compiled defaults.
//!
//! ## Resolution Order
//!
//! 1. **Environment variables**: `COURSEDESK_DEFAULT_PAGE_SIZE`, `COURSEDESK_DATA_FILE`, ...
//! 2. **Config file**: an explicit path, or `coursedesk.toml` in the OS config
//!    directory (via the `directories` crate). A missing file is skipped.
//! 3. **Compiled defaults**: `#[config(default = ...)]` below.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `default_page_size` | `10` | Rows per page when none is requested |
//! | `page_size_options` | `[5, 10, 20, 50]` | Page sizes offered by list views |
//! | `data_file` | none | JSON catalog to load instead of the demo data |
//! | `export_format` | `csv` | Format used by `export` when none is given |

use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::error::{CourseDeskError, Result};
use crate::table::{ExportFormat, DEFAULT_PAGE_SIZE};

/// Name of the config file looked up in the OS config directory.
pub const CONFIG_FILE_NAME: &str = "coursedesk.toml";

fn parse_export_format(raw: &str) -> Result<ExportFormat> {
    ExportFormat::from_str(raw)
}

fn default_page_size_options() -> Vec<usize> {
    vec![5, 10, 20, 50]
}

/// Configuration for coursedesk, stored in `coursedesk.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CourseDeskConfig {
    /// Rows per page when a list does not ask for a page size.
    #[config(default = 10, env = "COURSEDESK_DEFAULT_PAGE_SIZE")]
    pub default_page_size: usize,

    /// Page sizes offered by the list views.
    #[config(
        default = [5, 10, 20, 50],
        env = "COURSEDESK_PAGE_SIZE_OPTIONS",
        parse_env = confique::env::parse::list_by_comma
    )]
    pub page_size_options: Vec<usize>,

    /// JSON catalog snapshot to load at start-up. The demo catalog is used
    /// when absent.
    #[config(env = "COURSEDESK_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Format of `export` when none is requested.
    #[config(default = "csv", env = "COURSEDESK_EXPORT_FORMAT", parse_env = parse_export_format)]
    pub export_format: ExportFormat,
}

impl Default for CourseDeskConfig {
    fn default() -> Self {
        Self {
            default_page_size: DEFAULT_PAGE_SIZE,
            page_size_options: default_page_size_options(),
            data_file: None,
            export_format: ExportFormat::Csv,
        }
    }
}

impl CourseDeskConfig {
    /// Load from the environment and `path`, or the default config file
    /// location when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => Some(p.to_path_buf()),
            None => default_config_path(),
        };

        let mut builder = Self::builder().env();
        if let Some(file) = &file {
            debug!(path = %file.display(), "reading config file");
            builder = builder.file(file);
        }
        builder
            .load()
            .map_err(|e| CourseDeskError::Config(e.to_string()))
    }

    /// The page size to use for a request: the requested one when positive,
    /// otherwise the configured default (itself at least 1).
    pub fn page_size(&self, requested: Option<usize>) -> usize {
        match requested {
            Some(n) if n > 0 => n,
            _ => self.default_page_size.max(1),
        }
    }

    /// Configured page size options, falling back to the built-in ones when
    /// the list is empty or only holds zeros.
    pub fn page_size_options(&self) -> Vec<usize> {
        let mut options: Vec<usize> = self
            .page_size_options
            .iter()
            .copied()
            .filter(|n| *n > 0)
            .collect();
        if options.is_empty() {
            return default_page_size_options();
        }
        options.sort_unstable();
        options.dedup();
        options
    }
}

/// `coursedesk.toml` in the OS config directory, when one can be determined.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "coursedesk", "coursedesk")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_builtin_values() {
        let config = CourseDeskConfig::default();
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.page_size_options, vec![5, 10, 20, 50]);
        assert_eq!(config.export_format, ExportFormat::Csv);
        assert!(config.data_file.is_none());
    }

    #[test]
    fn page_size_falls_back_on_zero_or_none() {
        let config = CourseDeskConfig {
            default_page_size: 20,
            ..Default::default()
        };
        assert_eq!(config.page_size(Some(5)), 5);
        assert_eq!(config.page_size(Some(0)), 20);
        assert_eq!(config.page_size(None), 20);

        let broken = CourseDeskConfig {
            default_page_size: 0,
            ..Default::default()
        };
        assert_eq!(broken.page_size(None), 1);
    }

    #[test]
    fn page_size_options_are_cleaned() {
        let config = CourseDeskConfig {
            page_size_options: vec![20, 0, 5, 20],
            ..Default::default()
        };
        assert_eq!(config.page_size_options(), vec![5, 20]);

        let empty = CourseDeskConfig {
            page_size_options: vec![0],
            ..Default::default()
        };
        assert_eq!(empty.page_size_options(), vec![5, 10, 20, 50]);
    }

    #[test]
    fn loads_values_from_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "default_page_size = 25").unwrap();
        writeln!(file, "export_format = \"json\"").unwrap();
        writeln!(file, "data_file = \"/tmp/catalog.json\"").unwrap();

        let config = CourseDeskConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.export_format, ExportFormat::Json);
        assert_eq!(config.data_file, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.page_size_options, vec![5, 10, 20, 50]);
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = CourseDeskConfig::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config.default_page_size, 10);
    }

    #[test]
    fn invalid_file_is_a_config_error() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "default_page_size = \"many\"").unwrap();
        assert!(matches!(
            CourseDeskConfig::load(Some(file.path())),
            Err(CourseDeskError::Config(_))
        ));
    }

    #[test]
    fn serializes_to_toml() {
        let text = toml::to_string(&CourseDeskConfig::default()).unwrap();
        assert!(text.contains("default_page_size = 10"));
        assert!(text.contains("export_format = \"csv\""));
    }
}
