//! End-to-end session flows through the process-wide API
//!
//! Every test opens its own session with a private output directory, so the
//! tests can share the global registry while running in parallel.

use std::fs;
use std::path::Path;

use bulk_pipeline::{
    ConsoleConfig, DualFileConfig, PipelineError, SessionId, SessionOptions, SessionReport,
    connect_with, disconnect, receive,
};
use tempfile::TempDir;

fn options(bulk_size: usize, dir: &Path) -> SessionOptions {
    SessionOptions::new(bulk_size)
        .with_console(ConsoleConfig::default())
        .with_file(DualFileConfig::default().with_path(dir))
}

/// Contents of every bulk file, sorted, one entry per file
fn bulk_files(dir: &Path) -> Vec<Vec<String>> {
    let mut files: Vec<Vec<String>> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            fs::read_to_string(entry.unwrap().path())
                .unwrap()
                .lines()
                .map(str::to_owned)
                .collect()
        })
        .collect();
    files.sort();
    files
}

fn run(bulk_size: usize, chunks: &[&[u8]]) -> (SessionReport, Vec<Vec<String>>) {
    let dir = TempDir::new().unwrap();
    let handle = connect_with(options(bulk_size, dir.path())).unwrap();
    for chunk in chunks {
        receive(handle, chunk).unwrap();
    }
    let report = disconnect(handle).unwrap();
    (report, bulk_files(dir.path()))
}

#[test]
fn test_sized_and_dynamic_scenario_across_chunks() {
    let (report, files) = run(
        5,
        &[b"1", b"\n2\n3\n4\n5\n6\n{\na\n", b"b\nc\nd\n}\n"],
    );

    assert_eq!(
        files,
        vec![
            vec!["1", "2", "3", "4", "5"],
            vec!["6"],
            vec!["a", "b", "c", "d"],
        ]
    );

    let main = report.get("main").unwrap();
    assert_eq!(main.lines, Some(12));
    assert_eq!(main.bulks, 3);
    assert_eq!(main.commands, 10);

    let log = report.get("log").unwrap();
    assert_eq!((log.bulks, log.commands), (3, 10));
}

#[test]
fn test_trailing_line_flushed_on_disconnect() {
    let (report, files) = run(5, &[b"1\n2\n3\n4\n5\n6\n{\na\nb\nc\nd\n}\n89\n"]);

    assert_eq!(files.len(), 4);
    assert!(files.contains(&vec!["89".to_string()]));

    let main = report.get("main").unwrap();
    assert_eq!(main.bulks, 4);
    assert_eq!(main.commands, 11);
}

#[test]
fn test_remainder_flushed_in_order() {
    let input: String = (1..=12).map(|i| format!("{i}\n")).collect();
    let (report, files) = run(5, &[input.as_bytes()]);

    let mut expected = vec![
        vec!["1", "2", "3", "4", "5"],
        vec!["6", "7", "8", "9", "10"],
        vec!["11", "12"],
    ];
    expected.sort();
    assert_eq!(files, expected);
    assert_eq!(report.get("main").unwrap().bulks, 3);
}

#[test]
fn test_markers_never_reach_output() {
    let (_, files) = run(2, &[b"x\n{\n{\ny\n}\nz\n}\n{\n}\nw\n"]);

    let all: Vec<String> = files.into_iter().flatten().collect();
    assert!(!all.iter().any(|l| l == "{" || l == "}"));

    let mut sorted = all.clone();
    sorted.sort();
    assert_eq!(sorted, vec!["w", "x", "y", "z"]);
}

#[test]
fn test_empty_session() {
    let (report, files) = run(3, &[]);

    assert!(files.is_empty());
    for row in &report.sinks {
        assert_eq!(row.bulks, 0);
        assert_eq!(row.commands, 0);
    }
    assert_eq!(report.get("main").unwrap().lines, Some(0));
    assert_eq!(report.sinks.len(), 4);
}

#[test]
fn test_one_byte_chunks_match_single_chunk() {
    let input: &[u8] = b"q\nw\ne\nt\ny\n{\nQ\nW\nE\nT\nY\n}\na\ns\nd\nf\ng\n";

    let (whole_report, whole_files) = run(5, &[input]);
    let bytes: Vec<&[u8]> = input.chunks(1).collect();
    let (split_report, split_files) = run(5, &bytes);

    assert_eq!(whole_files, split_files);
    assert_eq!(whole_report.get("main"), split_report.get("main"));
    assert_eq!(whole_files.len(), 3);
}

#[test]
fn test_sessions_are_independent() {
    let dir_a = TempDir::new().unwrap();
    let dir_b = TempDir::new().unwrap();

    let a = connect_with(options(2, dir_a.path())).unwrap();
    let b = connect_with(options(2, dir_b.path())).unwrap();
    assert_ne!(a, b);

    receive(a, b"1\n").unwrap();
    receive(b, b"x\ny\nz\n").unwrap();
    receive(a, b"2\n").unwrap();

    let report_b = disconnect(b).unwrap();
    let report_a = disconnect(a).unwrap();

    assert_eq!(bulk_files(dir_a.path()), vec![vec!["1", "2"]]);
    assert_eq!(bulk_files(dir_b.path()), vec![vec!["x", "y"], vec!["z"]]);
    assert_eq!(report_a.get("main").unwrap().lines, Some(2));
    assert_eq!(report_b.get("main").unwrap().lines, Some(3));
}

#[test]
fn test_invalid_handles() {
    let dir = TempDir::new().unwrap();
    let handle = connect_with(options(3, dir.path())).unwrap();
    disconnect(handle).unwrap();

    assert!(matches!(
        receive(handle, b"late\n"),
        Err(PipelineError::InvalidHandle(h)) if h == handle
    ));
    assert!(matches!(
        disconnect(handle),
        Err(PipelineError::InvalidHandle(_))
    ));
    assert!(matches!(
        receive(SessionId::new(u64::MAX), b"x\n"),
        Err(PipelineError::InvalidHandle(_))
    ));
}

#[test]
fn test_zero_bulk_size_rejected() {
    let dir = TempDir::new().unwrap();
    assert!(matches!(
        connect_with(options(0, dir.path())),
        Err(PipelineError::InvalidBulkSize)
    ));
}
