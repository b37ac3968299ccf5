//! Command-line configuration. The roster itself has nothing to configure; the
//! flags only decide where and how loudly the session is logged.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use directories::ProjectDirs;
use tracing::level_filters::LevelFilter;

/// Application name used to resolve the per-user data directory.
const APP_NAME: &str = "student-roster";
/// Log file name stored inside the application data directory.
const LOG_FILE_NAME: &str = "roster.log";

#[derive(Debug, Parser)]
#[command(
    name = "student-roster",
    version,
    about = "Terminal roster manager for student groups (in-memory, per session)"
)]
pub struct Cli {
    /// Raise log verbosity (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Explicit log level (overrides -v).
    #[arg(long = "log-level", value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Write logs to this file instead of ~/.student-roster/roster.log.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Disable logging entirely.
    #[arg(long = "no-log", conflicts_with = "log_file")]
    pub no_log: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevelArg> for LevelFilter {
    fn from(level: LogLevelArg) -> Self {
        match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        }
    }
}

/// Resolved logging settings handed to `logging::init_logging`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level_filter: LevelFilter,
    /// Defer to `RUST_LOG` when the user did not pick a level explicitly.
    pub use_env_filter: bool,
    /// `None` disables logging.
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Build logging configuration with a consistent precedence:
    /// `--log-level` beats `-v`, and either beats `RUST_LOG`.
    pub fn log_config(&self) -> LogConfig {
        let level_filter = match (self.log_level, self.verbose) {
            (Some(level), _) => level.into(),
            (None, 0) => LevelFilter::INFO,
            (None, 1) => LevelFilter::DEBUG,
            (None, _) => LevelFilter::TRACE,
        };
        let log_file = if self.no_log {
            None
        } else {
            Some(self.log_file.clone().unwrap_or_else(default_log_path))
        };

        LogConfig {
            level_filter,
            use_env_filter: self.log_level.is_none() && self.verbose == 0,
            log_file,
        }
    }
}

/// Resolve the log path inside the per-user data directory, falling back to
/// the working directory when none can be located.
fn default_log_path() -> PathBuf {
    match ProjectDirs::from("", "", APP_NAME) {
        Some(dirs) => dirs.data_dir().join(LOG_FILE_NAME),
        None => PathBuf::from(LOG_FILE_NAME),
    }
}
