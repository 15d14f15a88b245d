//! Process-wide file logging for the reminder core.
//!
//! # Responsibility
//! - Start one rolling file logger per process from `LogSettings`.
//! - Capture panics as sanitized `event=panic_captured` lines.
//!
//! # Invariants
//! - Log lines carry ids, counts and codes only; reminder titles,
//!   descriptions and place labels are never written.
//! - Once a logger runs, only identical settings are accepted again.
//! - Starting the logger never panics.

use crate::config::CoreConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::fmt;
use std::panic::PanicHookInfo;
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOG_FILE_BASENAME: &str = "locreminder";
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;
const KEEP_ROTATED_FILES: usize = 3;
const PANIC_PAYLOAD_LIMIT: usize = 160;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Validated logger settings: a canonical level and an absolute directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    level: &'static str,
    dir: PathBuf,
}

impl LogSettings {
    pub fn new(level: &str, dir: impl AsRef<Path>) -> Result<Self, LoggingError> {
        let dir = dir.as_ref();
        if !dir.is_absolute() {
            return Err(LoggingError::InvalidDir(dir.display().to_string()));
        }
        Ok(Self {
            level: normalize_level(level)?,
            dir: dir.to_path_buf(),
        })
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl fmt::Display for LogSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "level `{}` in `{}`", self.level, self.dir.display())
    }
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("unsupported log level `{0}`; expected one of trace, debug, info, warn, error")]
    UnsupportedLevel(String),
    #[error("log directory must be an absolute path, got `{0}`")]
    InvalidDir(String),
    #[error("cannot create log directory `{path}`: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("logger backend failed to start: {0}")]
    Backend(#[from] flexi_logger::FlexiLoggerError),
    #[error("logger already running with {active}; cannot switch to {requested}")]
    Conflict {
        active: LogSettings,
        requested: LogSettings,
    },
}

/// Starts file logging, or confirms it already runs with the same settings.
pub fn init_logging(level: &str, log_dir: impl AsRef<Path>) -> Result<(), LoggingError> {
    start(LogSettings::new(level, log_dir)?)
}

/// Starts file logging when `config.log_dir` is set.
///
/// Returns `Ok(false)` without touching the logger when no directory is
/// configured.
pub fn init_logging_from_config(config: &CoreConfig) -> Result<bool, LoggingError> {
    match &config.log_dir {
        Some(dir) => init_logging(&config.log_level, dir).map(|()| true),
        None => Ok(false),
    }
}

/// Settings of the running logger, if any.
pub fn logging_status() -> Option<LogSettings> {
    ACTIVE.get().map(|active| active.settings.clone())
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    let wanted = level.trim().to_ascii_lowercase();
    let wanted = if wanted == "warning" { "warn" } else { wanted.as_str() };
    LEVELS
        .iter()
        .copied()
        .find(|known| *known == wanted)
        .ok_or_else(|| LoggingError::UnsupportedLevel(level.trim().to_string()))
}

fn start(requested: LogSettings) -> Result<(), LoggingError> {
    let active = ACTIVE.get_or_try_init(|| spawn_logger(requested.clone()))?;
    if active.settings != requested {
        return Err(LoggingError::Conflict {
            active: active.settings.clone(),
            requested,
        });
    }
    Ok(())
}

fn spawn_logger(settings: LogSettings) -> Result<ActiveLogger, LoggingError> {
    std::fs::create_dir_all(&settings.dir).map_err(|source| LoggingError::CreateDir {
        path: settings.dir.clone(),
        source,
    })?;

    let handle = Logger::try_with_str(settings.level)?
        .log_to_file(
            FileSpec::default()
                .directory(&settings.dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEEP_ROTATED_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    PANIC_HOOK.get_or_init(install_panic_hook);
    info!(
        "event=logging_start module=core status=ok platform={} version={} level={}",
        std::env::consts::OS,
        env!("CARGO_PKG_VERSION"),
        settings.level
    );

    Ok(ActiveLogger {
        settings,
        _handle: handle,
    })
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map_or_else(|| "unknown".to_string(), |at| format!("{}:{}", at.file(), at.line()));
        error!(
            "event=panic_captured module=core status=error location={location} payload={}",
            flatten_for_log(panic_payload(info), PANIC_PAYLOAD_LIMIT)
        );
        previous(info);
    }));
}

fn panic_payload<'a>(info: &'a PanicHookInfo<'_>) -> &'a str {
    let payload = info.payload();
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        *message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Keeps a panic payload on one line and within `limit` characters.
fn flatten_for_log(value: &str, limit: usize) -> String {
    let mut chars = value
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c });
    let mut flat: String = chars.by_ref().take(limit).collect();
    if chars.next().is_some() {
        flat.push_str("...");
    }
    flat
}
