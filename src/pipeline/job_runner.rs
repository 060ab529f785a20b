// Phase 2: ジョブ単位: 外部プログラム実行 -> 生出力保存 -> DCS抽出

use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::{info, warn};

use crate::artifacts;
use crate::error::BatchError;

/// Prefix of the stdout line carrying the DCS gene list.
pub const DCS_MARKER: &str = "DCS:";

/// Separator after which the comma-separated DCS tokens start.
pub const DCS_SEPARATOR: &str = "DCS: ";

/// Configuration for a single job.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub input_path: PathBuf,
    /// Input unit name the artifacts are keyed by.
    pub name: String,
    pub program: PathBuf,
    pub output_folder: PathBuf,
    pub dcs_folder: PathBuf,
}

/// Result of processing a single job.
#[derive(Debug, Clone)]
pub struct JobResult {
    pub input_path: PathBuf,
    pub name: String,
    pub raw_output_path: PathBuf,
    /// `None` when the program printed no `DCS:` line.
    pub dcs_path: Option<PathBuf>,
    pub dcs_len: usize,
}

/// Run the external program on one input and persist its artifacts.
///
/// The raw stdout is written before the DCS line is parsed, so a parse
/// failure still leaves the raw-output artifact behind.
pub fn run_job(config: &JobConfig) -> crate::error::Result<JobResult> {
    let stdout = invoke_program(&config.program, &config.input_path)?;
    info!(input = %config.input_path.display(), "program output:\n{stdout}");

    let raw_output_path = artifacts::raw_output_path(&config.output_folder, &config.name);
    std::fs::write(&raw_output_path, &stdout)?;

    let (dcs_path, dcs_len) = match extract_dcs(&stdout)? {
        Some(tokens) => {
            let path = artifacts::dcs_path(&config.dcs_folder, &config.name);
            write_dcs(&path, &tokens)?;
            (Some(path), tokens.len())
        }
        None => (None, 0),
    };

    info!(
        "Processed: {}, saved to {}",
        config.name,
        raw_output_path.display()
    );

    Ok(JobResult {
        input_path: config.input_path.clone(),
        name: config.name.clone(),
        raw_output_path,
        dcs_path,
        dcs_len,
    })
}

/// `<program> <input>` を実行し、標準出力を文字列で返す。
///
/// 終了コードは失敗扱いにしない（警告ログのみ）。
fn invoke_program(program: &Path, input_path: &Path) -> crate::error::Result<String> {
    let output = Command::new(program)
        .arg(input_path)
        .output()
        .map_err(|e| BatchError::job(format!("failed to execute {}: {e}", program.display())))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(
            input = %input_path.display(),
            "{} exited with code {}: {}",
            program.display(),
            output
                .status
                .code()
                .map_or_else(|| "unknown".to_string(), |c| c.to_string()),
            stderr.trim()
        );
    }

    String::from_utf8(output.stdout)
        .map_err(|e| BatchError::output_parse(format!("program output is not valid UTF-8: {e}")))
}

/// 最初の `DCS:` 行からトークン列を取り出す。該当行がなければ `None`。
pub fn extract_dcs(stdout: &str) -> crate::error::Result<Option<Vec<String>>> {
    let Some(line) = stdout.lines().find(|line| line.starts_with(DCS_MARKER)) else {
        return Ok(None);
    };

    let (_, list) = line.split_once(DCS_SEPARATOR).ok_or_else(|| {
        BatchError::output_parse(format!(
            "DCS line has no '{DCS_SEPARATOR}' separator: '{line}'"
        ))
    })?;

    Ok(Some(list.split(',').map(str::to_string).collect()))
}

/// One token per row, no header.
fn write_dcs(path: &Path, tokens: &[String]) -> crate::error::Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    for token in tokens {
        writer.write_record([token])?;
    }
    writer.flush()?;
    Ok(())
}
