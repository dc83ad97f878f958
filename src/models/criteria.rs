//! Query criteria accepted by the boundary index.

use serde::Deserialize;

use super::AdminLevel;
use crate::config::Defaults;
use crate::error::BoundaryError;

pub const DEFAULT_COUNTRY: &str = "中华人民共和国";
pub const DEFAULT_SOURCE: &str = "高德";

/// How many matching records a resolution returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordMode {
    #[default]
    All,
    /// Only the first row, in store iteration order
    First,
}

/// Partially specified boundary query.
///
/// Names must be full official names ("河北省", not "河北"); no fuzzy matching
/// is attempted. `Criteria::default()` targets the 高德 boundaries of
/// 中华人民共和国 with every other field unset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Criteria {
    pub country: Option<String>,
    pub province: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    /// Raw level token; derived from the most specific name when unset
    pub level: Option<String>,
    pub source: Option<String>,
    pub record: RecordMode,
    pub only_geometry: bool,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            country: Some(DEFAULT_COUNTRY.to_string()),
            province: None,
            city: None,
            district: None,
            level: None,
            source: Some(DEFAULT_SOURCE.to_string()),
            record: RecordMode::All,
            only_geometry: false,
        }
    }
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from configured country/source defaults instead of the built-in ones
    pub fn from_defaults(defaults: &Defaults) -> Self {
        Self {
            country: defaults.country.clone(),
            source: defaults.source.clone(),
            ..Self::default()
        }
    }

    pub fn country(mut self, name: impl Into<String>) -> Self {
        self.country = Some(name.into());
        self
    }

    /// Do not constrain (or validate) the country
    pub fn any_country(mut self) -> Self {
        self.country = None;
        self
    }

    pub fn province(mut self, name: impl Into<String>) -> Self {
        self.province = Some(name.into());
        self
    }

    pub fn city(mut self, name: impl Into<String>) -> Self {
        self.city = Some(name.into());
        self
    }

    pub fn district(mut self, name: impl Into<String>) -> Self {
        self.district = Some(name.into());
        self
    }

    pub fn level(mut self, token: impl Into<String>) -> Self {
        self.level = Some(token.into());
        self
    }

    pub fn with_level(self, level: AdminLevel) -> Self {
        self.level(level.token())
    }

    pub fn source(mut self, name: impl Into<String>) -> Self {
        self.source = Some(name.into());
        self
    }

    /// Accept boundaries from every data provider
    pub fn any_source(mut self) -> Self {
        self.source = None;
        self
    }

    pub fn first(mut self) -> Self {
        self.record = RecordMode::First;
        self
    }

    pub fn only_geometry(mut self) -> Self {
        self.only_geometry = true;
        self
    }

    /// Name supplied for a given level
    pub fn name_at(&self, level: AdminLevel) -> Option<&str> {
        let name = match level {
            AdminLevel::Country => &self.country,
            AdminLevel::Province => &self.province,
            AdminLevel::City => &self.city,
            AdminLevel::District => &self.district,
        };
        supplied(name)
    }

    /// Source to filter on, `None` when every provider is accepted
    pub fn source_filter(&self) -> Option<&str> {
        supplied(&self.source)
    }

    /// Supplied names, country first
    pub fn names(&self) -> impl Iterator<Item = (AdminLevel, &str)> + '_ {
        AdminLevel::all()
            .iter()
            .filter_map(|level| self.name_at(*level).map(|name| (*level, name)))
    }

    /// The level the resolution runs at.
    ///
    /// An explicit token wins; otherwise the most specific supplied name decides.
    /// `Ok(None)` means no name and no level were given, so records of every
    /// tier are eligible.
    pub fn effective_level(&self) -> Result<Option<AdminLevel>, BoundaryError> {
        match supplied(&self.level) {
            Some(token) => token.parse().map(Some),
            None => Ok(self.names().last().map(|(level, _)| level)),
        }
    }
}

/// An empty string counts as not given.
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
