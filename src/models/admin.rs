//! Administrative tiers and the boundary records stored for them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BoundaryError;

/// Administrative tier of a boundary record.
///
/// Variants are declared from the coarsest to the most specific tier, so the
/// derived ordering reads "less specific than".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum AdminLevel {
    /// Country (国)
    Country,
    /// Province, municipality or special administrative region (省)
    Province,
    /// Prefecture-level city (市)
    City,
    /// District or county (区县)
    District,
}

impl AdminLevel {
    /// Get all levels in hierarchical order (country first)
    pub fn all() -> &'static [AdminLevel] {
        &[
            AdminLevel::Country,
            AdminLevel::Province,
            AdminLevel::City,
            AdminLevel::District,
        ]
    }

    /// Token stored in the `level` column of the record store
    pub fn token(&self) -> &'static str {
        match self {
            AdminLevel::Country => "国",
            AdminLevel::Province => "省",
            AdminLevel::City => "市",
            AdminLevel::District => "区县",
        }
    }

    /// Get the store column holding the name for this level
    pub fn field_name(&self) -> &'static str {
        match self {
            AdminLevel::Country => "country",
            AdminLevel::Province => "province",
            AdminLevel::City => "city",
            AdminLevel::District => "district",
        }
    }

    /// Chinese spellings accepted by `from_str`, listed in error messages.
    pub fn accepted_tokens() -> &'static [&'static str] {
        &["国", "省", "市", "区县", "区", "县", "区/县"]
    }
}

impl fmt::Display for AdminLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for AdminLevel {
    type Err = BoundaryError;

    /// Parse a level token. 区 and 县 are two spellings of the same tier.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim() {
            "国" | "country" => Ok(AdminLevel::Country),
            "省" | "province" => Ok(AdminLevel::Province),
            "市" | "city" => Ok(AdminLevel::City),
            "区" | "县" | "区县" | "区/县" | "district" | "county" => Ok(AdminLevel::District),
            other => Err(BoundaryError::InvalidLevel {
                token: other.to_string(),
            }),
        }
    }
}

/// One row of the boundary store.
///
/// Only the name fields up to and including `level` are authoritative; the
/// others may be null or carry values that are not meaningful for filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdministrativeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,

    pub level: AdminLevel,

    /// Data provider, e.g. "高德"
    pub source: String,

    /// Free-form classification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Geometry asset path, relative to the geojson directory
    #[serde(skip)]
    pub geometry_ref: String,
}

impl AdministrativeRecord {
    /// Get the name stored for a given level
    pub fn name_at(&self, level: AdminLevel) -> Option<&str> {
        match level {
            AdminLevel::Country => self.country.as_deref(),
            AdminLevel::Province => self.province.as_deref(),
            AdminLevel::City => self.city.as_deref(),
            AdminLevel::District => self.district.as_deref(),
        }
    }

    /// Name of the record at its own level
    pub fn name(&self) -> Option<&str> {
        self.name_at(self.level)
    }
}
