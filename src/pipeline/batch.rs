// Phase 6: バッチ全体: ディレクトリ準備 -> 並列ジョブ -> 統計抽出 -> 集約 -> 後片付け

use std::path::PathBuf;

use tracing::{info, warn};

use crate::artifacts;
use crate::config::resolved::BatchConfig;
use crate::error::BatchError;
use crate::pipeline::orchestrator::{discover_inputs, plan_jobs, run_all_jobs};
use crate::statistics::extractor::{ExtractionError, extract_all};
use crate::statistics::table::{ConsolidatedTable, remove_raw_outputs};

/// Summary of one batch run.
#[derive(Debug)]
pub struct BatchReport {
    pub jobs_completed: usize,
    /// Input path and error message of every failed or rejected job.
    pub failed_jobs: Vec<(PathBuf, String)>,
    /// Input units included in the consolidated table, in column order.
    pub table_columns: Vec<String>,
    /// Raw outputs excluded from the table.
    pub excluded: Vec<ExtractionError>,
    pub statistics_path: PathBuf,
    pub raw_outputs_removed: usize,
}

/// Run the whole batch described by `config`.
///
/// Job failures are recorded in the report. Errors returned from here are
/// fatal for the run: unreadable folders, a failed table write or cleanup,
/// and incomplete statistics when `strict_statistics` is set.
pub fn run_batch(config: &BatchConfig) -> crate::error::Result<BatchReport> {
    prepare_directories(config)?;

    let inputs = discover_inputs(&config.input_folder, &config.input_extension)?;
    let plan = plan_jobs(
        &inputs,
        &config.program,
        &config.output_folder,
        &config.dcs_folder,
    );

    let results = run_all_jobs(&plan.jobs, config.workers)?;

    let mut jobs_completed = 0;
    let mut failed_jobs = plan.rejected;
    for (job, result) in plan.jobs.iter().zip(results) {
        match result {
            Ok(_) => jobs_completed += 1,
            Err(e) => failed_jobs.push((job.input_path.clone(), e.to_string())),
        }
    }
    info!(
        completed = jobs_completed,
        failed = failed_jobs.len(),
        "all jobs finished"
    );

    let extraction = extract_all(&config.output_folder)?;
    if config.strict_statistics && !extraction.failures.is_empty() {
        let details: Vec<String> = extraction.failures.iter().map(ToString::to_string).collect();
        return Err(BatchError::statistics(format!(
            "incomplete statistics: {}",
            details.join("; ")
        )));
    }
    for failure in &extraction.failures {
        warn!("excluded from statistics table: {failure}");
    }

    let table = ConsolidatedTable::from_records(extraction.records);
    let statistics_path = artifacts::statistics_path(&config.output_folder);
    table.write_csv(&statistics_path)?;

    let raw_outputs_removed = if config.keep_raw_outputs {
        0
    } else {
        remove_raw_outputs(&extraction.raw_outputs)?
    };

    Ok(BatchReport {
        jobs_completed,
        failed_jobs,
        table_columns: table.column_names().into_iter().map(str::to_string).collect(),
        excluded: extraction.failures,
        statistics_path,
        raw_outputs_removed,
    })
}

/// Create the output and DCS folders if they do not exist.
pub fn prepare_directories(config: &BatchConfig) -> crate::error::Result<()> {
    for dir in [&config.output_folder, &config.dcs_folder] {
        std::fs::create_dir_all(dir).map_err(|e| {
            BatchError::config(format!("cannot create {}: {e}", dir.display()))
        })?;
    }
    Ok(())
}
