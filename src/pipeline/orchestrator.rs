// Phase 3: 全ジョブ実行（固定サイズのワーカープール）

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{error, info};

use crate::artifacts;
use crate::error::BatchError;
use crate::pipeline::job_runner::{JobConfig, JobResult, run_job};

/// Enumerate input files in `input_folder` whose name ends with `.<extension>`.
///
/// Directories are skipped. The result is sorted by path so that job
/// submission order does not depend on the filesystem.
pub fn discover_inputs(input_folder: &Path, extension: &str) -> crate::error::Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(input_folder).map_err(|e| {
        BatchError::discovery(format!(
            "cannot read input folder {}: {e}",
            input_folder.display()
        ))
    })?;

    let suffix = format!(".{extension}");
    let mut inputs = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let matches = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.ends_with(&suffix));
        if matches {
            inputs.push(entry.path());
        }
    }

    inputs.sort();
    Ok(inputs)
}

/// Jobs ready for dispatch plus inputs that cannot be given their own artifacts.
#[derive(Debug, Default)]
pub struct JobPlan {
    pub jobs: Vec<JobConfig>,
    /// Input path and reason for every input that will not be run.
    pub rejected: Vec<(PathBuf, String)>,
}

/// Build one [`JobConfig`] per input.
///
/// Artifact names must be unique within a batch. When two inputs derive the
/// same unit name (`lung.csv`, `lung.v2.csv`), the first in path order keeps
/// it and the rest are rejected. Inputs without a derivable name are
/// rejected too.
pub fn plan_jobs(
    inputs: &[PathBuf],
    program: &Path,
    output_folder: &Path,
    dcs_folder: &Path,
) -> JobPlan {
    let mut plan = JobPlan::default();
    let mut claimed: HashMap<String, PathBuf> = HashMap::new();

    for input_path in inputs {
        let Some(name) = artifacts::input_unit_name(input_path) else {
            error!(input = %input_path.display(), "cannot derive input unit name, skipping");
            plan.rejected
                .push((input_path.clone(), "cannot derive input unit name".to_string()));
            continue;
        };

        if let Some(owner) = claimed.get(&name) {
            let reason = format!(
                "input unit name '{name}' already used by {}",
                owner.display()
            );
            error!(input = %input_path.display(), "{reason}, skipping");
            plan.rejected.push((input_path.clone(), reason));
            continue;
        }
        claimed.insert(name.clone(), input_path.clone());

        plan.jobs.push(JobConfig {
            input_path: input_path.clone(),
            name,
            program: program.to_path_buf(),
            output_folder: output_folder.to_path_buf(),
            dcs_folder: dcs_folder.to_path_buf(),
        });
    }

    plan
}

/// Run multiple jobs on a pool of `workers` threads, collecting results.
///
/// One job failure does NOT prevent other jobs from running. Results are
/// returned in the order of `jobs`; this call returns only after every job
/// has finished.
pub fn run_all_jobs(
    jobs: &[JobConfig],
    workers: usize,
) -> crate::error::Result<Vec<crate::error::Result<JobResult>>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|i| format!("discos-worker-{i}"))
        .build()?;

    info!(jobs = jobs.len(), workers = pool.current_num_threads(), "dispatching jobs");

    let results: Vec<crate::error::Result<JobResult>> = pool.install(|| {
        jobs.par_iter()
            .map(|job| {
                let result = run_job(job);
                if let Err(e) = &result {
                    error!("Error processing {}: {e}", job.input_path.display());
                }
                result
            })
            .collect()
    });

    Ok(results)
}
