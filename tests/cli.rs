/*!
 * Integration tests for the textpack command-line interface
 */

use std::fs::{self, File};
use std::io::Write;
use std::process::Command;

use tempfile::tempdir;

fn textpack_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_textpack"))
}

#[test]
fn test_missing_source_exits_with_failure() {
    let output = textpack_cmd()
        .args(["--source", "/definitely/not/a/real/path"])
        .output()
        .expect("failed to spawn textpack");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Source directory not found"));
}

#[test]
fn test_consolidates_into_output_file() {
    let temp_dir = tempdir().unwrap();
    let src_dir = temp_dir.path().join("project");
    fs::create_dir(&src_dir).unwrap();

    let mut rs_file = File::create(src_dir.join("hello.rs")).unwrap();
    writeln!(rs_file, "fn main() {{ println!(\"hello\"); }}").unwrap();
    let mut js_file = File::create(src_dir.join("app.js")).unwrap();
    writeln!(js_file, "console.log('hello');").unwrap();

    let output_file = temp_dir.path().join("bundle.txt");

    let output = textpack_cmd()
        .args([
            "--source",
            &src_dir.to_string_lossy(),
            "--output",
            &output_file.to_string_lossy(),
        ])
        .output()
        .expect("failed to spawn textpack");

    assert!(output.status.success());
    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("CONSOLIDATED SOURCE EXPORT"));
    assert!(content.contains("FILE: app.js"));
    assert!(content.contains("FILE: hello.rs"));
    assert!(content.contains("console.log('hello');"));

    // The standalone summary lands next to the output file
    let summary = fs::read_to_string(temp_dir.path().join("conversion_summary.txt")).unwrap();
    assert!(summary.contains("Converted:        2"));
}

#[test]
fn test_extension_override_filters_conversion() {
    let temp_dir = tempdir().unwrap();
    let src_dir = temp_dir.path().join("project");
    fs::create_dir(&src_dir).unwrap();

    let mut rs_file = File::create(src_dir.join("keep.rs")).unwrap();
    writeln!(rs_file, "pub fn keep() {{}}").unwrap();
    let mut js_file = File::create(src_dir.join("drop.js")).unwrap();
    writeln!(js_file, "dropped();").unwrap();

    let output_file = temp_dir.path().join("bundle.txt");

    let status = textpack_cmd()
        .args([
            "--source",
            &src_dir.to_string_lossy(),
            "--output",
            &output_file.to_string_lossy(),
            "--extensions",
            "rs",
        ])
        .status()
        .expect("failed to spawn textpack");

    assert!(status.success());
    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("FILE: keep.rs"));
    assert!(!content.contains("FILE: drop.js"));
}

#[test]
fn test_json_report_on_stdout() {
    let temp_dir = tempdir().unwrap();
    let src_dir = temp_dir.path().join("project");
    fs::create_dir(&src_dir).unwrap();
    let mut rs_file = File::create(src_dir.join("lib.rs")).unwrap();
    writeln!(rs_file, "pub fn lib() {{}}").unwrap();

    let output_file = temp_dir.path().join("bundle.txt");

    let output = textpack_cmd()
        .args([
            "--source",
            &src_dir.to_string_lossy(),
            "--output",
            &output_file.to_string_lossy(),
            "--report-format",
            "json",
        ])
        .output()
        .expect("failed to spawn textpack");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("\"files_scanned\""));
    assert!(stdout.contains("\"converted\": 1"));
}
