//! Error taxonomy for boundary resolution.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::LoadError;
use crate::index::StoreError;
use crate::models::AdminLevel;

/// Where a resolution ran out of matching records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundStage {
    /// A single supplied name matched no record on its own
    Criterion { level: AdminLevel, value: String },
    /// Every name exists individually but the combined, narrowed query is empty
    Combined,
}

impl fmt::Display for NotFoundStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotFoundStage::Criterion { level, value } => {
                write!(f, "no record has {} = '{}'", level.field_name(), value)
            }
            NotFoundStage::Combined => f.write_str("no record matches the combined criteria"),
        }
    }
}

/// Errors surfaced by [`crate::BoundaryIndex`].
#[derive(Debug, Error)]
pub enum BoundaryError {
    #[error("boundary not found: {stage}")]
    NotFound { stage: NotFoundStage },

    #[error(
        "unrecognized level '{token}', expected one of: {}",
        AdminLevel::accepted_tokens().join(", ")
    )]
    InvalidLevel { token: String },

    #[error("failed to load geometry: {0}")]
    Load(#[from] LoadError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors raised while reading an [`crate::IndexConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
