//! SQLite-backed record store over the `ADMINISTRATIVE` table.

use std::fmt;
use std::path::{Path, PathBuf};

use rusqlite::{params_from_iter, Connection, OpenFlags, Row};
use tracing::debug;

use super::store::{RecordFilter, RecordStore, StoreError};
use crate::models::{AdminLevel, AdministrativeRecord};

const TABLE: &str = "ADMINISTRATIVE";
const COLUMNS: &str = "id, country, province, city, district, level, source, kind, path";

/// Read-only store holding one connection for its lifetime.
///
/// The connection is released when the store is dropped.
pub struct SqliteRecordStore {
    connection: Connection,
    path: PathBuf,
}

impl fmt::Debug for SqliteRecordStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteRecordStore")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteRecordStore {
    /// Open the database at `path` read-only
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)
            .map_err(|source| StoreError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            connection,
            path: path.to_path_buf(),
        })
    }
}

/// Build `WHERE` text with numbered placeholders and the values bound to them.
///
/// Column names come from a fixed set; values are never spliced into the SQL.
fn where_clause(filter: &RecordFilter) -> (String, Vec<&str>) {
    let predicates = filter.predicates();
    let mut clause = String::from("WHERE 1");
    let mut values = Vec::with_capacity(predicates.len());
    for (i, (column, value)) in predicates.into_iter().enumerate() {
        clause.push_str(&format!(" AND {} = ?{}", column, i + 1));
        values.push(value);
    }
    (clause, values)
}

fn read_record(row: &Row<'_>) -> Result<AdministrativeRecord, StoreError> {
    let id: i64 = row.get(0)?;
    let token: String = row.get(5)?;
    let level: AdminLevel = token
        .parse()
        .map_err(|_| StoreError::InvalidLevel { id, token })?;

    Ok(AdministrativeRecord {
        country: row.get(1)?,
        province: row.get(2)?,
        city: row.get(3)?,
        district: row.get(4)?,
        level,
        source: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
        kind: row.get(7)?,
        geometry_ref: row.get(8)?,
    })
}

impl RecordStore for SqliteRecordStore {
    fn count(&self, filter: &RecordFilter) -> Result<usize, StoreError> {
        let (clause, values) = where_clause(filter);
        let query = format!("SELECT COUNT(*) FROM {TABLE} {clause}");
        debug!("{} {:?}", query, values);

        let count: i64 = self
            .connection
            .query_row(&query, params_from_iter(values.iter()), |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    fn fetch(&self, filter: &RecordFilter) -> Result<Vec<AdministrativeRecord>, StoreError> {
        let (clause, values) = where_clause(filter);
        let query = format!("SELECT {COLUMNS} FROM {TABLE} {clause}");
        debug!("{} {:?}", query, values);

        let mut statement = self.connection.prepare(&query)?;
        let mut rows = statement.query(params_from_iter(values.iter()))?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(read_record(row)?);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_store(rows: &[(&str, Option<&str>, &str, &str)]) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("index.db");
        let connection = Connection::open(&path).unwrap();
        connection
            .execute_batch(
                "CREATE TABLE ADMINISTRATIVE (
                    id INTEGER PRIMARY KEY,
                    country TEXT, province TEXT, city TEXT, district TEXT,
                    level TEXT NOT NULL, source TEXT, kind TEXT, path TEXT NOT NULL
                )",
            )
            .unwrap();
        for (country, province, level, path) in rows {
            connection
                .execute(
                    "INSERT INTO ADMINISTRATIVE (country, province, level, source, path)
                     VALUES (?1, ?2, ?3, '高德', ?4)",
                    (country, province, level, path),
                )
                .unwrap();
        }
        (dir, path)
    }

    #[test]
    fn test_fetch_in_insertion_order() {
        let (_dir, path) = create_store(&[
            ("中华人民共和国", None, "国", "country.json"),
            ("中华人民共和国", Some("河北省"), "省", "hebei.json"),
            ("中华人民共和国", Some("山西省"), "省", "shanxi.json"),
        ]);
        let store = SqliteRecordStore::open(&path).unwrap();

        let filter = RecordFilter {
            level: Some(AdminLevel::Province),
            ..Default::default()
        };
        let records = store.fetch(&filter).unwrap();
        let names: Vec<_> = records.iter().filter_map(|r| r.name()).collect();
        assert_eq!(names, ["河北省", "山西省"]);
        assert_eq!(records[0].geometry_ref, "hebei.json");
        assert_eq!(store.count(&filter).unwrap(), 2);
    }

    #[test]
    fn test_values_are_bound_not_spliced() {
        let (_dir, path) = create_store(&[("中华人民共和国", Some("河北省"), "省", "hebei.json")]);
        let store = SqliteRecordStore::open(&path).unwrap();

        let filter = RecordFilter::single(AdminLevel::Province, "x' OR '1'='1");
        assert_eq!(store.count(&filter).unwrap(), 0);
        assert!(store.fetch(&filter).unwrap().is_empty());
    }

    #[test]
    fn test_unknown_level_in_row() {
        let (_dir, path) = create_store(&[("中华人民共和国", Some("河北省"), "乡", "x.json")]);
        let store = SqliteRecordStore::open(&path).unwrap();
        let err = store.fetch(&RecordFilter::default()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidLevel { id: 1, ref token } if token == "乡"));
    }

    #[test]
    fn test_open_missing_database() {
        let dir = TempDir::new().unwrap();
        let err = SqliteRecordStore::open(dir.path().join("absent.db")).unwrap_err();
        assert!(matches!(err, StoreError::Open { .. }));
    }

    #[test]
    fn test_where_clause_numbers_placeholders() {
        let filter = RecordFilter {
            level: Some(AdminLevel::District),
            city: Some("石家庄市".to_string()),
            source: Some("高德".to_string()),
            ..Default::default()
        };
        let (clause, values) = where_clause(&filter);
        assert_eq!(clause, "WHERE 1 AND level = ?1 AND city = ?2 AND source = ?3");
        assert_eq!(values, ["区县", "石家庄市", "高德"]);
    }
}
