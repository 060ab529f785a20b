// 成果物の命名規則: <output>/<name>_output.txt, <dcs>/<name>_DCS.csv, <output>/statistics.csv

use std::path::{Path, PathBuf};

/// Suffix of the raw captured stdout of one job.
pub const RAW_OUTPUT_SUFFIX: &str = "_output.txt";

/// Suffix of the DCS token list of one job.
pub const DCS_SUFFIX: &str = "_DCS.csv";

/// File name of the consolidated statistics table.
pub const STATISTICS_FILE: &str = "statistics.csv";

/// Derive an input unit's name: the file name up to its first `.`.
///
/// Returns `None` when the path has no UTF-8 file name or the name would be
/// empty (e.g. `.csv`).
pub fn input_unit_name(input_path: &Path) -> Option<String> {
    let file_name = input_path.file_name()?.to_str()?;
    let name = file_name.split('.').next().unwrap_or(file_name);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

pub fn raw_output_path(output_folder: &Path, name: &str) -> PathBuf {
    output_folder.join(format!("{name}{RAW_OUTPUT_SUFFIX}"))
}

pub fn dcs_path(dcs_folder: &Path, name: &str) -> PathBuf {
    dcs_folder.join(format!("{name}{DCS_SUFFIX}"))
}

pub fn statistics_path(output_folder: &Path) -> PathBuf {
    output_folder.join(STATISTICS_FILE)
}

/// Recover the input unit name from a raw-output file name.
pub fn name_from_raw_output(file_name: &str) -> Option<&str> {
    file_name
        .strip_suffix(RAW_OUTPUT_SUFFIX)
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_unit_name_strips_from_first_dot() {
        assert_eq!(
            input_unit_name(Path::new("/data/lung.csv")).as_deref(),
            Some("lung")
        );
        assert_eq!(
            input_unit_name(Path::new("breast.v2.csv")).as_deref(),
            Some("breast")
        );
    }

    #[test]
    fn test_input_unit_name_rejects_dot_file() {
        assert!(input_unit_name(Path::new(".csv")).is_none());
    }

    #[test]
    fn test_name_from_raw_output() {
        assert_eq!(name_from_raw_output("lung_output.txt"), Some("lung"));
        assert_eq!(name_from_raw_output("_output.txt"), None);
        assert_eq!(name_from_raw_output("statistics.csv"), None);
    }
}
