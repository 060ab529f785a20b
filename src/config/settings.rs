use std::path::{Path, PathBuf};

use serde::Deserialize;

/// settings.yaml の内容。未指定のキーはデフォルト値で補完される。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub input_folder: PathBuf,
    pub output_folder: PathBuf,
    pub dcs_folder: PathBuf,
    pub program: PathBuf,
    /// Extension of eligible input files, without the leading dot.
    pub input_extension: String,
    /// Worker pool size. 0 means the host's available parallelism.
    pub parallel_workers: usize,
    /// Abort the whole batch when any raw output lacks a statistics field.
    pub strict_statistics: bool,
    pub keep_raw_outputs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            input_folder: PathBuf::from("input"),
            output_folder: PathBuf::from("output"),
            dcs_folder: PathBuf::from("dcs"),
            program: PathBuf::from("./DISCOS"),
            input_extension: "csv".to_string(),
            parallel_workers: 0,
            strict_statistics: false,
            keep_raw_outputs: false,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        serde_yml::from_str(yaml).map_err(|e| {
            crate::error::BatchError::config(format!("Failed to parse settings YAML: {e}"))
        })
    }

    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            crate::error::BatchError::config(format!(
                "Failed to read settings file {}: {e}",
                path.display()
            ))
        })?;
        Self::from_yaml(&content)
    }
}
