//! Installs the process-wide logger, so it lives in its own test binary.

use std::fs;

use log::{LevelFilter, debug, info};
use namedtuple_maker::logging::{LogConfig, LogTarget, LoggingError, init_logging};
use tempfile::tempdir;

const LOG_INFO_MESSAGE: &str = "This is a log entry.";

#[test]
fn file_logging_writes_at_the_requested_level() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("namedtuple-log.log");
    let config = LogConfig {
        level: Some("info".into()),
        log_file: path.clone(),
        log_to_console: false,
    };

    let context = init_logging(&config).unwrap();
    assert_eq!(context.level(), LevelFilter::Info);
    assert_eq!(context.target(), &LogTarget::File(path.clone()));

    info!("{LOG_INFO_MESSAGE}");
    debug!("filtered out at info level");
    context.shutdown();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains(LOG_INFO_MESSAGE));
    assert!(contents.contains("started INFO level logging"));
    assert!(!contents.contains("filtered out"));

    // A second logger cannot be installed in the same process.
    let again = init_logging(&LogConfig {
        log_to_console: true,
        ..LogConfig::default()
    });
    assert!(matches!(again, Err(LoggingError::AlreadyInitialized(_))));
}
