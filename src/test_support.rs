//! In-memory `RecordStore` and fixture helpers used by unit tests.

use std::cell::Cell;
use std::fs;
use std::io;
use std::path::Path;

use serde_json::json;

use crate::index::{RecordFilter, RecordStore, StoreError};
use crate::models::{AdminLevel, AdministrativeRecord};

/// Linear-scan record store that counts the queries it answers.
#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: Vec<AdministrativeRecord>,
    count_calls: Cell<usize>,
    fetch_calls: Cell<usize>,
}

impl MemoryRecordStore {
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = AdministrativeRecord>,
    {
        Self {
            records: records.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.get()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.get()
    }
}

impl RecordStore for MemoryRecordStore {
    fn count(&self, filter: &RecordFilter) -> Result<usize, StoreError> {
        self.count_calls.set(self.count_calls.get() + 1);
        Ok(self.records.iter().filter(|r| filter.matches(r)).count())
    }

    fn fetch(&self, filter: &RecordFilter) -> Result<Vec<AdministrativeRecord>, StoreError> {
        self.fetch_calls.set(self.fetch_calls.get() + 1);
        Ok(self
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}

/// Build a 高德 record; names are given country first.
pub fn record(level: AdminLevel, names: &[&str], geometry_ref: &str) -> AdministrativeRecord {
    let name = |i: usize| names.get(i).map(|n| n.to_string());
    AdministrativeRecord {
        country: name(0),
        province: name(1),
        city: name(2),
        district: name(3),
        level,
        source: "高德".to_string(),
        kind: None,
        geometry_ref: geometry_ref.to_string(),
    }
}

/// A small hierarchy: one country, two provinces, three cities, one district.
pub fn sample_records() -> Vec<AdministrativeRecord> {
    const CN: &str = "中华人民共和国";
    vec![
        record(AdminLevel::Country, &[CN], "country/cn.json"),
        record(AdminLevel::Province, &[CN, "河北省"], "province/130000.json"),
        record(AdminLevel::Province, &[CN, "山西省"], "province/140000.json"),
        record(AdminLevel::City, &[CN, "河北省", "石家庄市"], "city/130100.json"),
        record(AdminLevel::City, &[CN, "河北省", "唐山市"], "city/130200.json"),
        record(AdminLevel::City, &[CN, "山西省", "太原市"], "city/140100.json"),
        record(
            AdminLevel::District,
            &[CN, "河北省", "石家庄市", "长安区"],
            "district/130102.json",
        ),
    ]
}

/// Write a unit square feature with its lower-left corner at (`offset`, `offset`).
pub fn write_square(root: &Path, geometry_ref: &str, offset: f64) -> io::Result<()> {
    let path = root.join(geometry_ref);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let (lo, hi) = (offset, offset + 1.0);
    let feature = json!({
        "type": "Feature",
        "properties": {},
        "geometry": {
            "type": "Polygon",
            "coordinates": [[[lo, lo], [hi, lo], [hi, hi], [lo, hi], [lo, lo]]]
        }
    });
    fs::write(path, feature.to_string())
}
