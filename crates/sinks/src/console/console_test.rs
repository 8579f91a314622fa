//! Console sink tests

use std::io::{self, Write};
use std::sync::Arc;

use bulk_protocol::Bulk;
use parking_lot::Mutex;

use super::{ConsoleConfig, ConsoleSink, format_bulk};
use crate::Sink;

/// In-memory writer shared with the test
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn lines(&self) -> Vec<String> {
        String::from_utf8(self.0.lock().clone())
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn bulk(commands: &[&str]) -> Bulk {
    commands.iter().copied().collect()
}

// ============================================================================
// Formatting
// ============================================================================

#[test]
fn test_format_plain() {
    assert_eq!(format_bulk(&bulk(&["a", "b", "c"]), None), "bulk: a, b, c");
    assert_eq!(format_bulk(&bulk(&["only"]), None), "bulk: only");
}

#[test]
fn test_format_colored_keeps_content() {
    let line = format_bulk(
        &bulk(&["a", "b"]),
        Some(owo_colors::Style::new().dimmed()),
    );
    assert!(line.contains("bulk:"));
    assert!(line.ends_with(" a, b"));
    assert_ne!(line, "bulk: a, b");
}

#[test]
fn test_config_default_is_plain() {
    assert!(!ConsoleConfig::default().color);
    assert!(ConsoleConfig::with_color().color);
}

// ============================================================================
// Sink behavior
// ============================================================================

#[test]
fn test_prints_one_line_per_bulk_in_order() {
    let capture = Capture::default();
    let mut sink = ConsoleSink::with_writer(ConsoleConfig::default(), capture.clone()).unwrap();

    sink.post_bulk(bulk(&["1", "2", "3", "4", "5"]));
    sink.post_bulk(bulk(&["6"]));
    sink.post_bulk(bulk(&["a", "b", "c", "d"]));
    sink.shutdown();

    assert_eq!(
        capture.lines(),
        vec!["bulk: 1, 2, 3, 4, 5", "bulk: 6", "bulk: a, b, c, d"]
    );
}

#[test]
fn test_empty_bulk_prints_nothing() {
    let capture = Capture::default();
    let mut sink = ConsoleSink::with_writer(ConsoleConfig::default(), capture.clone()).unwrap();

    sink.post_bulk(Bulk::empty());
    let reports = sink.report();

    assert!(capture.lines().is_empty());
    assert_eq!(reports[0].bulks, 0);
    assert_eq!(reports[0].commands, 0);
}

#[test]
fn test_report_line() {
    let capture = Capture::default();
    let mut sink = ConsoleSink::with_writer(ConsoleConfig::default(), capture).unwrap();

    sink.post_bulk(bulk(&["1", "2", "3"]));
    sink.post_bulk(bulk(&["4"]));

    let reports = sink.report();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].to_string(), "log thread — 2 bulk(s), 4 commands");
}

#[test]
fn test_report_then_shutdown_is_idempotent() {
    let capture = Capture::default();
    let mut sink = ConsoleSink::with_writer(ConsoleConfig::default(), capture.clone()).unwrap();

    sink.post_bulk(bulk(&["x", "y"]));
    let first = sink.report();
    sink.shutdown();
    let second = sink.report();

    assert_eq!(first, second);
    assert_eq!(capture.lines(), vec!["bulk: x, y"]);
}

#[test]
fn test_post_after_shutdown_is_dropped() {
    let capture = Capture::default();
    let mut sink = ConsoleSink::with_writer(ConsoleConfig::default(), capture.clone()).unwrap();

    sink.shutdown();
    sink.post_bulk(bulk(&["late"]));

    assert!(capture.lines().is_empty());
    assert_eq!(sink.report()[0].bulks, 0);
}

#[test]
fn test_drop_joins_and_drains() {
    let capture = Capture::default();
    {
        let mut sink =
            ConsoleSink::with_writer(ConsoleConfig::default(), capture.clone()).unwrap();
        for i in 0..50 {
            sink.post_bulk(bulk(&[&i.to_string()]));
        }
    }

    assert_eq!(capture.lines().len(), 50);
    assert_eq!(capture.lines()[49], "bulk: 49");
}
