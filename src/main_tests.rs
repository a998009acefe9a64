use std::fs;

use log::LevelFilter;
use qc_results::output::{ColorMode, OutputFormat};
use qc_results::result::{Issue, IssueLevel, ResultContainer};
use qc_results::{EXIT_ERROR, EXIT_SUCCESS};
use tempfile::TempDir;

use crate::{format_output, load_results, log_level, write_output};

fn write_result(dir: &TempDir, name: &str, bundle: &str) -> std::path::PathBuf {
    let mut container = ResultContainer::new();
    container
        .create_checker_bundle(bundle, "", "")
        .create_checker("c", "", "")
        .add_issue(Issue::new("d", IssueLevel::Warning));
    let path = dir.path().join(name);
    container.write_results(&path).unwrap();
    path
}

#[test]
fn exit_codes_documented() {
    assert_eq!(EXIT_SUCCESS, 0);
    assert_eq!(EXIT_ERROR, 2);
}

#[test]
fn log_level_follows_flags() {
    assert_eq!(log_level(0, false), LevelFilter::Warn);
    assert_eq!(log_level(1, false), LevelFilter::Info);
    assert_eq!(log_level(2, false), LevelFilter::Debug);
    assert_eq!(log_level(5, false), LevelFilter::Trace);
    assert_eq!(log_level(3, true), LevelFilter::Error);
}

#[test]
fn load_results_merges_files() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_result(&temp_dir, "a.xqar", "A");
    let b = write_result(&temp_dir, "b.xqar", "B");

    let container = load_results(&[a, b]).unwrap();
    assert_eq!(container.checker_bundle_count(), 2);
    assert_eq!(container.issue_count(), 2);
}

#[test]
fn load_results_fails_on_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    assert!(load_results(&[temp_dir.path().join("missing.xqar")]).is_err());
}

#[test]
fn format_output_dispatches_on_format() {
    let mut container = ResultContainer::new();
    container.create_checker_bundle("B", "", "");

    let text = format_output(OutputFormat::Text, &container, ColorMode::Never, 0).unwrap();
    assert!(text.starts_with("B\n"));

    let json = format_output(OutputFormat::Json, &container, ColorMode::Never, 0).unwrap();
    assert!(json.contains("\"bundles\""));
}

#[test]
fn write_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("summary.txt");

    write_output(Some(&path), "content", false).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "content");
}
