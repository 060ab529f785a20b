// Phase 4: 生出力ファイル群から統計レコードを抽出する

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::StatisticsRecord;
use super::fields::{Field, FieldError, FieldValue, extract_fields};
use crate::artifacts;
use crate::error::BatchError;

/// Why one raw output did not yield a record.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionError {
    pub name: String,
    pub problems: Vec<(Field, FieldError)>,
    /// Set when the artifact could not be decoded as text; `problems` is empty then.
    pub unreadable: Option<String>,
}

impl fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        if let Some(reason) = &self.unreadable {
            return write!(f, " unreadable ({reason})");
        }
        for (i, (field, problem)) in self.problems.iter().enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{sep}{} {problem}", field.label())?;
        }
        Ok(())
    }
}

impl std::error::Error for ExtractionError {}

/// Result of scanning every raw output in a folder.
#[derive(Debug, Default)]
pub struct Extraction {
    /// One record per raw output that had all required fields, in file name order.
    pub records: Vec<StatisticsRecord>,
    pub failures: Vec<ExtractionError>,
    /// Every raw-output artifact that was read, parsed or not.
    pub raw_outputs: Vec<PathBuf>,
}

/// Build a record from one raw output text.
///
/// Every schema field is checked before returning, so the error lists all
/// missing or unparsable fields at once.
pub fn extract_record(name: &str, text: &str) -> Result<StatisticsRecord, ExtractionError> {
    let mut patients = None;
    let mut genes = None;
    let mut runtime_secs = None;
    let mut dcs_size = None;
    let mut problems = Vec::new();

    for outcome in extract_fields(text) {
        match (outcome.spec.field, outcome.value) {
            (Field::Patients, Ok(FieldValue::Count(n))) => patients = Some(n),
            (Field::Genes, Ok(FieldValue::Count(n))) => genes = Some(n),
            (Field::Runtime, Ok(FieldValue::Seconds(s))) => runtime_secs = Some(s),
            (Field::DcsSize, Ok(FieldValue::Count(n))) => dcs_size = Some(n),
            (field, Ok(value)) => problems.push((
                field,
                FieldError::Unparsable(format!("{value:?}")),
            )),
            (field, Err(e)) => problems.push((field, e)),
        }
    }

    match (patients, genes, runtime_secs, dcs_size) {
        (Some(patients), Some(genes), Some(runtime_secs), Some(dcs_size)) if problems.is_empty() => {
            Ok(StatisticsRecord {
                name: name.to_string(),
                patients,
                genes,
                runtime_secs,
                dcs_size,
            })
        }
        _ => Err(ExtractionError {
            name: name.to_string(),
            problems,
            unreadable: None,
        }),
    }
}

/// List `*_output.txt` files in `output_folder`, sorted by file name.
pub fn list_raw_outputs(output_folder: &Path) -> crate::error::Result<Vec<(String, PathBuf)>> {
    let entries = std::fs::read_dir(output_folder).map_err(|e| {
        BatchError::statistics(format!(
            "cannot read output folder {}: {e}",
            output_folder.display()
        ))
    })?;

    let mut raw_outputs = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        if let Some(name) = file_name.to_str().and_then(artifacts::name_from_raw_output) {
            raw_outputs.push((name.to_string(), entry.path()));
        }
    }

    raw_outputs.sort_by(|a, b| a.1.cmp(&b.1));
    Ok(raw_outputs)
}

/// Read every raw output currently present and extract its statistics.
///
/// Incomplete or undecodable outputs are collected in
/// [`Extraction::failures`]; only I/O errors abort the scan.
pub fn extract_all(output_folder: &Path) -> crate::error::Result<Extraction> {
    let mut extraction = Extraction::default();

    for (name, path) in list_raw_outputs(output_folder)? {
        let parsed = match String::from_utf8(std::fs::read(&path)?) {
            Ok(text) => extract_record(&name, &text),
            Err(e) => Err(ExtractionError {
                name: name.clone(),
                problems: Vec::new(),
                unreadable: Some(format!("not valid UTF-8: {e}")),
            }),
        };
        match parsed {
            Ok(record) => {
                debug!(?record, "extracted statistics");
                extraction.records.push(record);
            }
            Err(e) => {
                warn!("incomplete statistics in {}: {e}", path.display());
                extraction.failures.push(e);
            }
        }
        extraction.raw_outputs.push(path);
    }

    Ok(extraction)
}
