//! Location of the boundary data and default query scope.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::models::{DEFAULT_COUNTRY, DEFAULT_SOURCE};

#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    /// SQLite database holding the `ADMINISTRATIVE` table
    pub database: PathBuf,
    /// Directory the records' geometry paths are relative to
    pub geojson_dir: PathBuf,
    #[serde(default)]
    pub defaults: Defaults,
}

/// Country and source applied when a query does not name them.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Defaults {
    pub country: Option<String>,
    pub source: Option<String>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            country: Some(DEFAULT_COUNTRY.to_string()),
            source: Some(DEFAULT_SOURCE.to_string()),
        }
    }
}

impl IndexConfig {
    /// Standard layout of a data directory: `index.db` beside `geojson.min/`
    pub fn from_data_dir<P: AsRef<Path>>(data_dir: P) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            database: data_dir.join("index.db"),
            geojson_dir: data_dir.join("geojson.min"),
            defaults: Defaults::default(),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
