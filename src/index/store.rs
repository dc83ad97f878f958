//! Read-only record store interface.
//!
//! The boundary index only ever asks two questions of a store: how many rows
//! match an exact-match conjunctive filter, and which rows those are.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::{AdminLevel, AdministrativeRecord};

/// Error raised by a record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open record store at {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("record {id} has unrecognized level '{token}'")]
    InvalidLevel { id: i64, token: String },

    #[error(transparent)]
    Database(#[from] rusqlite::Error),
}

/// Exact-match conjunctive predicate over the record columns.
///
/// Unset fields do not constrain the match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub level: Option<AdminLevel>,
    pub source: Option<String>,
}

impl RecordFilter {
    /// Filter on a single name column, nothing else
    pub fn single(level: AdminLevel, name: &str) -> Self {
        let mut filter = Self::default();
        filter.set_name(level, name);
        filter
    }

    pub fn set_name(&mut self, level: AdminLevel, name: &str) {
        let slot = match level {
            AdminLevel::Country => &mut self.country,
            AdminLevel::Province => &mut self.province,
            AdminLevel::City => &mut self.city,
            AdminLevel::District => &mut self.district,
        };
        *slot = Some(name.to_string());
    }

    pub fn name_at(&self, level: AdminLevel) -> Option<&str> {
        let name = match level {
            AdminLevel::Country => &self.country,
            AdminLevel::Province => &self.province,
            AdminLevel::City => &self.city,
            AdminLevel::District => &self.district,
        };
        name.as_deref()
    }

    /// Column/value pairs in a fixed column order
    pub fn predicates(&self) -> Vec<(&'static str, &str)> {
        let mut predicates = Vec::new();
        if let Some(level) = self.level {
            predicates.push(("level", level.token()));
        }
        for level in AdminLevel::all() {
            if let Some(name) = self.name_at(*level) {
                predicates.push((level.field_name(), name));
            }
        }
        if let Some(source) = &self.source {
            predicates.push(("source", source.as_str()));
        }
        predicates
    }

    pub fn matches(&self, record: &AdministrativeRecord) -> bool {
        let level_ok = self.level.map_or(true, |level| record.level == level);
        let names_ok = AdminLevel::all().iter().all(|level| {
            self.name_at(*level)
                .map_or(true, |name| record.name_at(*level) == Some(name))
        });
        let source_ok = self
            .source
            .as_deref()
            .map_or(true, |source| record.source == source);
        level_ok && names_ok && source_ok
    }
}

/// Read-only access to boundary records.
///
/// Rows come back in the store's own iteration order; callers must not rely
/// on any other ordering.
pub trait RecordStore {
    /// Number of records matching `filter`
    fn count(&self, filter: &RecordFilter) -> Result<usize, StoreError>;

    /// All records matching `filter`
    fn fetch(&self, filter: &RecordFilter) -> Result<Vec<AdministrativeRecord>, StoreError>;
}
