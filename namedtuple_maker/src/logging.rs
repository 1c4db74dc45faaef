//! Logging setup.
//!
//! Logging is configured once per process through [`init_logging`], which hands
//! back a [`LoggingContext`] that the host keeps until it calls
//! [`LoggingContext::shutdown`]. Nothing is configured implicitly.
//!
//! Level names are case-insensitive and may be any of [`LOG_LEVELS`]. Log lines
//! go to `./namedtuple-log.log` unless console output is requested.

use std::env;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Target};
use log::{LevelFilter, SetLoggerError, info};
use thiserror::Error;

pub const LOG_FILE_NAME: &str = "namedtuple-log.log";
pub const LOG_LEVEL_DEFAULT: &str = "INFO";
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const LOG_TO_CONSOLE_ENV: &str = "LOG_TO_CONSOLE";

/// Accepted level names, most severe first.
pub const LOG_LEVELS: [&str; 9] = [
    "FATAL", "ERROR", "CRITICAL", "WARN", "WARNING", "INFO", "NOTICE", "DEBUG", "TRACE",
];

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("the specified logging level \"{level}\" is invalid; use one of the following values:\n{}", numbered_levels())]
    InvalidLevel { level: String },
    #[error("cannot open log file {}: {source}", .path.display())]
    OpenFile { path: PathBuf, source: io::Error },
    #[error("logging was already initialized: {0}")]
    AlreadyInitialized(#[from] SetLoggerError),
}

fn numbered_levels() -> String {
    LOG_LEVELS
        .iter()
        .enumerate()
        .map(|(index, level)| format!("{}. {level}\n", index + 1))
        .collect()
}

/// Map a level name onto a `log` filter.
///
/// # Errors
/// [`LoggingError::InvalidLevel`] for names outside [`LOG_LEVELS`].
pub fn parse_level(raw: &str) -> Result<LevelFilter, LoggingError> {
    let filter = match raw.trim().to_ascii_uppercase().as_str() {
        "FATAL" | "ERROR" | "CRITICAL" => LevelFilter::Error,
        "WARN" | "WARNING" => LevelFilter::Warn,
        "INFO" | "NOTICE" => LevelFilter::Info,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => {
            return Err(LoggingError::InvalidLevel { level: raw.to_string() });
        },
    };
    Ok(filter)
}

/// Interpret an on/off environment value. Anything non-blank counts as on
/// except the usual spellings of "off".
pub fn parse_flag(raw: &str) -> bool {
    let value = raw.trim().to_ascii_lowercase();
    !matches!(value.as_str(), "" | "0" | "false" | "no" | "off")
}

/// Where log lines end up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Console,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Requested level name; `None` means [`LOG_LEVEL_DEFAULT`].
    pub level: Option<String>,
    pub log_file: PathBuf,
    pub log_to_console: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: None,
            log_file: Path::new(".").join(LOG_FILE_NAME),
            log_to_console: false,
        }
    }
}

impl LogConfig {
    /// Read `LOG_LEVEL` and `LOG_TO_CONSOLE` from the environment.
    pub fn from_env() -> Self {
        Self {
            level: env::var(LOG_LEVEL_ENV).ok().filter(|level| !level.trim().is_empty()),
            log_to_console: env::var(LOG_TO_CONSOLE_ENV).is_ok_and(|flag| parse_flag(&flag)),
            ..Self::default()
        }
    }

    /// Upper-case name of the requested level.
    pub fn level_name(&self) -> String {
        self.level
            .as_deref()
            .map_or_else(|| LOG_LEVEL_DEFAULT.to_string(), |level| level.trim().to_ascii_uppercase())
    }

    /// # Errors
    /// [`LoggingError::InvalidLevel`] when the requested level is unknown.
    pub fn level_filter(&self) -> Result<LevelFilter, LoggingError> {
        parse_level(self.level.as_deref().unwrap_or(LOG_LEVEL_DEFAULT))
    }

    pub fn target(&self) -> LogTarget {
        if self.log_to_console {
            LogTarget::Console
        } else {
            LogTarget::File(self.log_file.clone())
        }
    }
}

/// Bordered one-line notice announcing the active level.
pub fn level_banner(level_name: &str) -> String {
    let message = format!("** Logging level set to {level_name} **");
    let border = "-".repeat(message.len());
    format!("{border}\n{message}\n{border}")
}

/// Handle on the process-wide logger installed by [`init_logging`].
#[derive(Debug)]
pub struct LoggingContext {
    level: LevelFilter,
    target: LogTarget,
}

impl LoggingContext {
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn target(&self) -> &LogTarget {
        &self.target
    }

    /// Flush pending output. The logger itself stays installed, as `log` has no
    /// way to remove it.
    pub fn shutdown(self) {
        info!("stopping {} level logging", self.level);
        log::logger().flush();
    }
}

/// Install the process-wide logger described by `config`.
///
/// # Errors
/// [`LoggingError::InvalidLevel`] for an unknown level, [`LoggingError::OpenFile`]
/// when the log file cannot be opened (for instance, its directory is missing),
/// and [`LoggingError::AlreadyInitialized`] if a logger is already installed.
pub fn init_logging(config: &LogConfig) -> Result<LoggingContext, LoggingError> {
    let level = config.level_filter()?;
    let target = config.target();

    let mut builder = Builder::new();
    builder.filter_level(level);
    match &target {
        LogTarget::Console => {
            builder.target(Target::Stdout);
        },
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| LoggingError::OpenFile {
                    path: path.clone(),
                    source,
                })?;
            builder.target(Target::Pipe(Box::new(file)));
        },
    }
    builder.try_init()?;

    // stderr, so stdout stays clean for record output
    eprintln!("{}", level_banner(&config.level_name()));
    match &target {
        LogTarget::Console => info!("initialized logging to console"),
        LogTarget::File(path) => info!("log file path is {}", path.display()),
    }
    info!("started {} level logging", config.level_name());

    Ok(LoggingContext { level, target })
}
