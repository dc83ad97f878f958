//! Turns partial criteria into boundary records paired with their geometries.

use tracing::{debug, info};

use super::names::project_names;
use super::sqlite::SqliteRecordStore;
use super::store::{RecordFilter, RecordStore};
use crate::config::IndexConfig;
use crate::error::{BoundaryError, NotFoundStage};
use crate::geometry::{BoundaryGeometry, GeometryLoader};
use crate::models::{AdminLevel, AdministrativeRecord, Criteria, RecordMode};

/// A resolved record and the geometry loaded from its reference.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBoundary {
    pub record: AdministrativeRecord,
    pub geometry: BoundaryGeometry,
}

/// Result of [`BoundaryIndex::resolve`], shaped by record mode and `only_geometry`.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    All(Vec<ResolvedBoundary>),
    First(ResolvedBoundary),
    Geometries(Vec<BoundaryGeometry>),
    Geometry(BoundaryGeometry),
}

impl Resolved {
    fn shape(
        boundaries: Vec<ResolvedBoundary>,
        criteria: &Criteria,
    ) -> Result<Self, BoundaryError> {
        let shaped = match (criteria.record, criteria.only_geometry) {
            (RecordMode::All, false) => Resolved::All(boundaries),
            (RecordMode::All, true) => {
                Resolved::Geometries(boundaries.into_iter().map(|b| b.geometry).collect())
            }
            (RecordMode::First, only_geometry) => {
                let first = boundaries.into_iter().next().ok_or(BoundaryError::NotFound {
                    stage: NotFoundStage::Combined,
                })?;
                if only_geometry {
                    Resolved::Geometry(first.geometry)
                } else {
                    Resolved::First(first)
                }
            }
        };
        Ok(shaped)
    }

    /// Number of boundaries carried
    pub fn len(&self) -> usize {
        match self {
            Resolved::All(boundaries) => boundaries.len(),
            Resolved::Geometries(geometries) => geometries.len(),
            Resolved::First(_) | Resolved::Geometry(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop metadata, keeping geometries in order
    pub fn into_geometries(self) -> Vec<BoundaryGeometry> {
        match self {
            Resolved::All(boundaries) => boundaries.into_iter().map(|b| b.geometry).collect(),
            Resolved::Geometries(geometries) => geometries,
            Resolved::First(boundary) => vec![boundary.geometry],
            Resolved::Geometry(geometry) => vec![geometry],
        }
    }
}

/// Boundary resolution over a record store and a geometry directory.
///
/// The index holds no mutable state; every call issues its own read-only
/// queries and builds fresh geometries.
#[derive(Debug)]
pub struct BoundaryIndex<S> {
    store: S,
    loader: GeometryLoader,
}

impl BoundaryIndex<SqliteRecordStore> {
    /// Open the SQLite store and geojson directory named by `config`
    pub fn open(config: &IndexConfig) -> Result<Self, BoundaryError> {
        let store = SqliteRecordStore::open(&config.database)?;
        Ok(Self::new(store, GeometryLoader::new(&config.geojson_dir)))
    }
}

impl<S: RecordStore> BoundaryIndex<S> {
    pub fn new(store: S, loader: GeometryLoader) -> Self {
        Self { store, loader }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Resolve `criteria` and shape the result per its record mode and
    /// `only_geometry` flag.
    pub fn resolve(&self, criteria: &Criteria) -> Result<Resolved, BoundaryError> {
        let boundaries = self.lookup(criteria)?;
        Resolved::shape(boundaries, criteria)
    }

    /// Resolve `criteria` into every matching record with its geometry.
    ///
    /// Ignores the record mode and `only_geometry` flag.
    pub fn lookup(&self, criteria: &Criteria) -> Result<Vec<ResolvedBoundary>, BoundaryError> {
        self.validate_names(criteria)?;

        let level = criteria.effective_level()?;
        debug!("Effective level: {:?}", level);

        let filter = narrowed_filter(criteria, level);
        let records = self.store.fetch(&filter)?;
        if records.is_empty() {
            return Err(BoundaryError::NotFound {
                stage: NotFoundStage::Combined,
            });
        }

        let boundaries = records
            .into_iter()
            .map(|record| -> Result<ResolvedBoundary, BoundaryError> {
                let geometry = self.loader.load(&record.geometry_ref)?;
                Ok(ResolvedBoundary { record, geometry })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!("Resolved {} boundaries", boundaries.len());
        Ok(boundaries)
    }

    /// Names at `level` of every boundary matching `criteria`.
    ///
    /// Records with no name stored at `level` are skipped.
    pub fn names_of(
        &self,
        level: AdminLevel,
        criteria: &Criteria,
    ) -> Result<Vec<String>, BoundaryError> {
        let criteria = criteria.clone().with_level(level);
        let boundaries = self.lookup(&criteria)?;
        Ok(project_names(level, boundaries.iter().map(|b| &b.record)))
    }

    /// Each supplied name must match at least one record on its own.
    fn validate_names(&self, criteria: &Criteria) -> Result<(), BoundaryError> {
        for (level, name) in criteria.names() {
            let matches = self.store.count(&RecordFilter::single(level, name))?;
            debug!("{} = '{}' matches {} records", level.field_name(), name, matches);
            if matches == 0 {
                return Err(BoundaryError::NotFound {
                    stage: NotFoundStage::Criterion {
                        level,
                        value: name.to_string(),
                    },
                });
            }
        }
        Ok(())
    }
}

/// Build the combined filter, dropping names more specific than `level`.
fn narrowed_filter(criteria: &Criteria, level: Option<AdminLevel>) -> RecordFilter {
    let mut filter = RecordFilter {
        level,
        source: criteria.source_filter().map(str::to_string),
        ..Default::default()
    };
    for (name_level, name) in criteria.names() {
        if level.map_or(true, |level| name_level <= level) {
            filter.set_name(name_level, name);
        }
    }
    debug!("Combined filter: {:?}", filter.predicates());
    filter
}
