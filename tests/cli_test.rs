// Phase 7: CLI entry point tests

use std::process::Command;

fn cargo_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_discos_batch"))
}

// ============================================================
// 1. --help flag shows usage and exits with success
// ============================================================

#[test]
fn test_main_help_flag() {
    let output = cargo_bin()
        .arg("--help")
        .output()
        .expect("failed to execute binary");

    assert!(
        output.status.success(),
        "should exit with success for --help"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Usage"),
        "stderr should contain 'Usage', got: {stderr}"
    );
}

// ============================================================
// 2. --version flag shows version and exits with success
// ============================================================

#[test]
fn test_main_version_flag() {
    let output = cargo_bin()
        .arg("--version")
        .output()
        .expect("failed to execute binary");

    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    let version = env!("CARGO_PKG_VERSION");
    assert!(
        stderr.contains(version),
        "stderr should contain version '{version}', got: {stderr}"
    );
}

// ============================================================
// 3. Nonexistent settings file produces error
// ============================================================

#[test]
fn test_main_nonexistent_settings_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = cargo_bin()
        .arg(dir.path().join("missing.yaml"))
        .output()
        .expect("failed to execute binary");

    assert!(
        !output.status.success(),
        "should exit with failure for nonexistent file"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("ERROR"),
        "stderr should contain error message, got: {stderr}"
    );
}

#[test]
fn test_main_too_many_arguments() {
    let output = cargo_bin()
        .args(["a.yaml", "b.yaml"])
        .output()
        .expect("failed to execute binary");

    assert!(!output.status.success());
}

// ============================================================
// 4. Full run through the binary
// ============================================================

#[cfg(unix)]
#[test]
fn test_main_runs_batch_from_settings() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let input = dir.path().join("input");
    std::fs::create_dir_all(&input).expect("mkdir");
    std::fs::write(
        input.join("lung.csv"),
        "Patients: 120\nGenes: 4500\nTime (seconds): 3.456\nSize of DCS: 7\nDCS: TP53,EGFR,KRAS\n",
    )
    .expect("write input");
    let settings_path = dir.path().join("settings.yaml");
    std::fs::write(&settings_path, "program: cat\nparallel_workers: 2\n").expect("write settings");

    let output = cargo_bin()
        .arg(&settings_path)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to execute binary");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "batch should succeed, got: {stderr}");
    // Captured program output is echoed at the default log level.
    assert!(stderr.contains("DCS: TP53,EGFR,KRAS"), "got: {stderr}");

    let table = std::fs::read_to_string(dir.path().join("output").join("statistics.csv"))
        .expect("statistics.csv");
    assert!(table.starts_with(",lung\n"), "got: {table}");
    assert!(table.contains("Runtime (s),3.46\n"), "got: {table}");
    assert!(dir.path().join("dcs").join("lung_DCS.csv").exists());
    assert!(!dir.path().join("output").join("lung_output.txt").exists());
}
