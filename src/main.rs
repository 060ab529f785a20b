use std::path::Path;
use std::process::ExitCode;

use discos_batch::config::{self, DEFAULT_SETTINGS_FILE};
use discos_batch::pipeline::batch::run_batch;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: discos_batch [settings.yaml]");
        eprintln!("  Run DISCOS over every input file and aggregate the statistics.");
        eprintln!("  Without an argument, ./{DEFAULT_SETTINGS_FILE} is used if present.");
        return ExitCode::SUCCESS;
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("discos_batch {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    if args.len() > 1 {
        eprintln!("ERROR: expected at most one settings file, got {}", args.len());
        eprintln!("Usage: discos_batch [settings.yaml]");
        return ExitCode::FAILURE;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings_path = args.first().map(Path::new);
    let batch_config = match config::load_batch_config(settings_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    let report = match run_batch(&batch_config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::FAILURE;
        }
    };

    for (input, message) in &report.failed_jobs {
        eprintln!("FAILED: {}: {message}", input.display());
    }
    for excluded in &report.excluded {
        eprintln!("EXCLUDED: {excluded}");
    }
    eprintln!(
        "OK: {} jobs completed, {} failed, {} columns -> {} ({} raw outputs removed)",
        report.jobs_completed,
        report.failed_jobs.len(),
        report.table_columns.len(),
        report.statistics_path.display(),
        report.raw_outputs_removed
    );

    ExitCode::SUCCESS
}
