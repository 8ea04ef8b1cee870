use std::fs;
use log::{info, debug, error};
use serial_test::serial;
use tempfile::tempdir;

use crate::core::logger;

#[test]
#[serial]
fn test_logger() {
    logger::setup(log::LevelFilter::Info, None).unwrap();
    info!("info: testing....");
    error!("error: testing...");
    logger::teardown();
}

#[test]
#[serial]
fn test_logger_to_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("contacts.log");
    let path = path.to_str().unwrap();

    logger::setup(log::LevelFilter::Info, Some(path)).unwrap();
    info!("written to file");
    debug!("filtered out");
    logger::revert_console_output();
    logger::teardown();

    let content = fs::read_to_string(path).unwrap();
    assert!(content.contains("[INFO] written to file"));
    assert!(!content.contains("filtered out"));
}

#[test]
#[serial]
fn test_logger_bad_path() {
    assert!(logger::setup(log::LevelFilter::Info, Some("/nonexistent/dir/contacts.log")).is_err());
}
