//! Integration tests for logger behavior.

use course_planner::logger::{set_level, set_level_from_str, Level};
use course_planner::{debug, error, info, verbose, warn};

#[test]
fn level_parse_accepts_valid() {
    assert!(set_level_from_str("error"));
    assert!(set_level_from_str("WARN"));
    assert!(set_level_from_str("info"));
    assert!(set_level_from_str("debug"));
}

#[test]
fn level_parse_rejects_invalid() {
    assert!(!set_level_from_str("invalid"));
    assert!(!set_level_from_str(""));
}

#[test]
fn logs_do_not_panic() {
    set_level(Level::Debug);
    info!("info integration");
    warn!("warn integration");
    error!("error integration");
    debug!("debug integration {}", 42);
    verbose!("verbose integration");
}

#[cfg(feature = "file-logging")]
#[test]
fn file_logging_writes_lines() {
    use course_planner::logger::{close_file_logging, init_file_logging};

    let dir = tempfile::TempDir::new().expect("temp dir");
    let path = dir.path().join("logs").join("planner.log");
    assert!(init_file_logging(&path));
    error!("written to file");
    close_file_logging();

    let content = std::fs::read_to_string(&path).expect("log file");
    assert!(content.contains("written to file"));
}
