// Black-box CLI tests: the `fsplit` binary is driven via
// std::process::Command. Covers dispatch, defaulting, exit codes, and the
// diagnostics prefix.

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Locate the `fsplit` binary produced by Cargo.
fn fsplit_bin() -> PathBuf {
    // CARGO_BIN_EXE_fsplit is set by Cargo when running integration tests.
    // Fall back to walking up from the test binary location.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_fsplit") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop(); // remove test binary filename
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("fsplit");
    p
}

// ── 1. Split / join round trip ────────────────────────────────────────────────

#[test]
fn cli_split_join_round_trip() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.txt");
    let content = "Hello, fsplit!\n".repeat(300); // ~4.4 KB
    fs::write(&input, &content).unwrap();
    let parts_dir = dir.path().join("parts");

    let status = Command::new(fsplit_bin())
        .args([
            "split",
            input.to_str().unwrap(),
            "-s",
            "1KB",
            "-d",
            parts_dir.to_str().unwrap(),
            "-q",
        ])
        .status()
        .expect("failed to run fsplit split");
    assert!(status.success(), "split step should exit 0");
    let n_parts = fs::read_dir(&parts_dir).unwrap().count();
    assert_eq!(n_parts, content.len().div_ceil(1024));

    let output = dir.path().join("rejoined.txt");
    let status = Command::new(fsplit_bin())
        .args([
            "join",
            parts_dir.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-q",
        ])
        .status()
        .expect("failed to run fsplit join");
    assert!(status.success(), "join step should exit 0");
    assert_eq!(fs::read(&output).unwrap(), content.as_bytes());
}

// ── 2. Defaults ───────────────────────────────────────────────────────────────

#[test]
fn cli_join_defaults_output_inside_parts_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("part_0000.part"), b"ab").unwrap();
    fs::write(dir.path().join("part_0001.part"), b"cd").unwrap();

    let status = Command::new(fsplit_bin())
        .args(["join", dir.path().to_str().unwrap(), "-q"])
        .status()
        .expect("failed to run fsplit join");
    assert!(status.success());
    assert_eq!(fs::read(dir.path().join("joined_file")).unwrap(), b"abcd");
}

#[test]
fn cli_split_defaults_out_dir_to_source_directory() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.bin");
    fs::write(&input, vec![9u8; 100]).unwrap();

    let status = Command::new(fsplit_bin())
        .args(["split", input.to_str().unwrap(), "-s", "40", "-q"])
        .status()
        .expect("failed to run fsplit split");
    assert!(status.success());
    assert!(dir.path().join("part_0000.part").exists());
    assert!(dir.path().join("part_0002.part").exists());
}

// ── 3. --version ──────────────────────────────────────────────────────────────

#[test]
fn cli_version_prints_the_crate_version() {
    let output = Command::new(fsplit_bin())
        .arg("--version")
        .output()
        .expect("failed to run fsplit --version");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains(fsplit::VERSION),
        "unexpected --version output: {stdout}"
    );
}

// ── 4. Error paths ────────────────────────────────────────────────────────────

#[test]
fn cli_missing_source_fails_with_prefixed_diagnostic() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("absent.bin");
    let output = Command::new(fsplit_bin())
        .args(["split", missing.to_str().unwrap(), "-s", "1MB", "-q"])
        .output()
        .expect("failed to run fsplit split");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("fsplit:"), "stderr was: {stderr}");
    assert!(stderr.contains("file not found"), "stderr was: {stderr}");
}

#[test]
fn cli_unparseable_chunk_size_fails() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.bin");
    fs::write(&input, b"data").unwrap();
    let output = Command::new(fsplit_bin())
        .args(["split", input.to_str().unwrap(), "-s", "abc", "-q"])
        .output()
        .expect("failed to run fsplit split");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid size"), "stderr was: {stderr}");
}

#[test]
fn cli_join_with_no_matching_parts_is_a_successful_noop() {
    let dir = TempDir::new().unwrap();
    let status = Command::new(fsplit_bin())
        .args(["join", dir.path().to_str().unwrap(), "-q"])
        .status()
        .expect("failed to run fsplit join");
    // Zero matches is the documented normal termination, not a failure.
    assert!(status.success());
    assert!(!dir.path().join("joined_file").exists());
}
