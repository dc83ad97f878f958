//! Projection of resolved records down to bare names.

use crate::models::{AdminLevel, AdministrativeRecord};

/// Project the name stored at `level` out of each record.
///
/// Records with no name at `level` are skipped.
pub fn project_names<'a>(
    level: AdminLevel,
    records: impl IntoIterator<Item = &'a AdministrativeRecord>,
) -> Vec<String> {
    records
        .into_iter()
        .filter_map(|record| record.name_at(level).map(str::to_string))
        .collect()
}
