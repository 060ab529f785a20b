use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use super::settings::Settings;
use crate::error::BatchError;

/// Settings with every path made concrete and the worker count fixed.
///
/// This is the value handed to the batch driver; nothing reads settings
/// from global state.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub input_folder: PathBuf,
    pub output_folder: PathBuf,
    pub dcs_folder: PathBuf,
    pub program: PathBuf,
    pub input_extension: String,
    pub workers: usize,
    pub strict_statistics: bool,
    pub keep_raw_outputs: bool,
}

impl BatchConfig {
    /// 相対パスは `base_dir`（設定ファイルのディレクトリ）基準で解決する。
    pub fn new(settings: &Settings, base_dir: &Path) -> crate::error::Result<Self> {
        for (key, path) in [
            ("input_folder", &settings.input_folder),
            ("output_folder", &settings.output_folder),
            ("dcs_folder", &settings.dcs_folder),
            ("program", &settings.program),
        ] {
            if path.as_os_str().is_empty() {
                return Err(BatchError::config(format!("{key} must not be empty")));
            }
        }

        let input_extension = settings.input_extension.trim_start_matches('.').to_string();
        if input_extension.is_empty() {
            return Err(BatchError::config("input_extension must not be empty"));
        }

        Ok(BatchConfig {
            input_folder: resolve_path(base_dir, &settings.input_folder),
            output_folder: resolve_path(base_dir, &settings.output_folder),
            dcs_folder: resolve_path(base_dir, &settings.dcs_folder),
            program: resolve_program(base_dir, &settings.program),
            input_extension,
            workers: resolve_workers(settings.parallel_workers),
            strict_statistics: settings.strict_statistics,
            keep_raw_outputs: settings.keep_raw_outputs,
        })
    }
}

/// Resolve a potentially relative path against a base directory.
/// If the path is already absolute, return it as-is.
pub fn resolve_path(base_dir: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}

/// A bare program name (no separator) is left for `PATH` lookup.
fn resolve_program(base_dir: &Path, program: &Path) -> PathBuf {
    if program.components().count() > 1 {
        resolve_path(base_dir, program)
    } else {
        program.to_path_buf()
    }
}

/// 0 はホストの論理コア数を意味する。
pub fn resolve_workers(requested: usize) -> usize {
    if requested > 0 {
        requested
    } else {
        std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1)
    }
}
