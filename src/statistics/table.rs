// Phase 5: 統計レコードを1つの表に集約し、生出力を削除する

use std::path::{Path, PathBuf};

use tracing::info;

use super::StatisticsRecord;
use super::fields::STATISTICS_FIELDS;
use crate::error::BatchError;

/// Fields as rows, input units as columns.
#[derive(Debug, Clone, Default)]
pub struct ConsolidatedTable {
    columns: Vec<StatisticsRecord>,
}

impl ConsolidatedTable {
    /// Column order follows `records`.
    pub fn from_records(records: Vec<StatisticsRecord>) -> Self {
        Self { columns: records }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|r| r.name.as_str()).collect()
    }

    /// Header row followed by one row per field; the first cell of each row is its label.
    pub fn rows(&self) -> Vec<Vec<String>> {
        let mut rows = Vec::with_capacity(STATISTICS_FIELDS.len() + 1);

        let mut header = vec![String::new()];
        header.extend(self.columns.iter().map(|r| r.name.clone()));
        rows.push(header);

        for spec in &STATISTICS_FIELDS {
            let mut row = vec![spec.field.label().to_string()];
            row.extend(self.columns.iter().map(|r| r.cell(spec.field)));
            rows.push(row);
        }
        rows
    }

    pub fn write_csv(&self, path: &Path) -> crate::error::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .map_err(|e| {
                BatchError::table(format!("cannot create {}: {e}", path.display()))
            })?;
        for row in self.rows() {
            writer.write_record(&row)?;
        }
        writer.flush()?;
        info!(
            columns = self.columns.len(),
            "statistics written to {}",
            path.display()
        );
        Ok(())
    }
}

/// Delete the given raw-output artifacts. Returns how many were removed.
///
/// Files that already disappeared are not an error.
pub fn remove_raw_outputs(paths: &[PathBuf]) -> crate::error::Result<usize> {
    let mut removed = 0;
    for path in paths {
        match std::fs::remove_file(path) {
            Ok(()) => removed += 1,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(BatchError::table(format!(
                    "cannot remove {}: {e}",
                    path.display()
                )));
            }
        }
    }
    Ok(removed)
}
