//! Builds a throwaway boundary database and geojson directory.

use std::fs;
use std::path::Path;

use rusqlite::Connection;
use serde_json::{json, Value};
use tempfile::TempDir;

use cnbounds::IndexConfig;

/// (country, province, city, district, level, source, path, geometry)
pub type Row = (
    &'static str,
    Option<&'static str>,
    Option<&'static str>,
    Option<&'static str>,
    &'static str,
    &'static str,
    &'static str,
    Value,
);

pub fn square(x: f64, y: f64, size: f64) -> Vec<Vec<f64>> {
    vec![
        vec![x, y],
        vec![x + size, y],
        vec![x + size, y + size],
        vec![x, y + size],
        vec![x, y],
    ]
}

pub fn polygon_feature(rings: Vec<Vec<Vec<f64>>>) -> Value {
    json!({"type": "Feature", "properties": {}, "geometry": {"type": "Polygon", "coordinates": rings}})
}

pub fn multipolygon(parts: Vec<Vec<Vec<Vec<f64>>>>) -> Value {
    json!({"type": "MultiPolygon", "coordinates": parts})
}

const CN: &str = "中华人民共和国";

/// A miniature 河北/山西 dataset with two providers.
pub fn hebei_rows() -> Vec<Row> {
    vec![
        (CN, None, None, None, "国", "高德", "country/cn.json",
            polygon_feature(vec![square(100.0, 20.0, 30.0)])),
        (CN, Some("河北省"), None, None, "省", "高德", "province/130000.json",
            multipolygon(vec![vec![square(114.0, 36.0, 6.0)]])),
        (CN, Some("河北省"), None, None, "省", "天地图", "tdt/province/130000.json",
            polygon_feature(vec![square(114.0, 36.0, 6.0)])),
        (CN, Some("山西省"), None, None, "省", "高德", "province/140000.json",
            polygon_feature(vec![square(110.0, 35.0, 3.5)])),
        (CN, Some("河北省"), Some("石家庄市"), None, "市", "高德", "city/130100.json",
            polygon_feature(vec![square(114.0, 37.0, 1.0)])),
        (CN, Some("河北省"), Some("唐山市"), None, "市", "高德", "city/130200.json",
            polygon_feature(vec![square(118.0, 39.0, 1.0)])),
        (CN, Some("山西省"), Some("太原市"), None, "市", "高德", "city/140100.json",
            polygon_feature(vec![square(112.0, 37.0, 1.0)])),
        (CN, Some("河北省"), Some("石家庄市"), Some("长安区"), "区县", "高德",
            "district/130102.json", polygon_feature(vec![square(114.5, 37.5, 0.1)])),
        (CN, Some("河北省"), Some("石家庄市"), Some("正定县"), "区县", "高德",
            "district/130123.json", polygon_feature(vec![square(114.2, 37.7, 0.2)])),
    ]
}

/// Write `rows` into `dir` using the `index.db` + `geojson.min/` layout.
pub fn write_dataset(dir: &Path, rows: &[Row]) -> IndexConfig {
    let config = IndexConfig::from_data_dir(dir);
    let connection = Connection::open(&config.database).expect("create database");
    connection
        .execute_batch(
            "CREATE TABLE ADMINISTRATIVE (
                id INTEGER PRIMARY KEY,
                country TEXT, province TEXT, city TEXT, district TEXT,
                level TEXT NOT NULL, source TEXT, kind TEXT, path TEXT NOT NULL
            )",
        )
        .expect("create table");

    for (country, province, city, district, level, source, path, geometry) in rows {
        connection
            .execute(
                "INSERT INTO ADMINISTRATIVE
                    (country, province, city, district, level, source, kind, path)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, '行政区', ?7)",
                (country, province, city, district, level, source, path),
            )
            .expect("insert row");

        let file = config.geojson_dir.join(path);
        fs::create_dir_all(file.parent().expect("asset has a parent")).expect("create dirs");
        fs::write(&file, geometry.to_string()).expect("write asset");
    }

    config
}

pub fn hebei_dataset() -> (TempDir, IndexConfig) {
    let dir = TempDir::new().expect("create temp dir");
    let config = write_dataset(dir.path(), &hebei_rows());
    (dir, config)
}
