//! # Logger
//!
//! Installs the global `tracing` subscriber for capable binaries.
//!
//! Diagnostics always go to stderr so that stdout stays free for program
//! output. A log directory can be added on top; files rotate daily, the last
//! [`KEPT_LOG_FILES`] are kept, and lines are plain text or JSON.
//!
//! ```rust
//! # use capable_logger::{Logger, LevelFilter};
//! let _logger = Logger::builder()
//!     .name("capable")
//!     .level(LevelFilter::DEBUG)
//!     .filter("capable_center=trace")
//!     .init()
//!     .unwrap();
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Rotated log files kept in the log directory.
pub const KEPT_LOG_FILES: usize = 7;

/// Builder state before [`LoggerBuilder::name`] was called.
#[derive(Debug)]
pub struct Unnamed;

/// Builder state once the logger is named.
#[derive(Debug)]
pub struct Named(String);

#[derive(Debug)]
struct FileOutput {
    dir: PathBuf,
    json: bool,
}

/// Builder for the global subscriber; [`init`](LoggerBuilder::init) needs a name.
#[derive(Debug)]
pub struct LoggerBuilder<N = Unnamed> {
    name: N,
    level: LevelFilter,
    directives: Option<String>,
    file: Option<FileOutput>,
}

impl LoggerBuilder<Unnamed> {
    /// Names the logger. Log files are prefixed with it.
    pub fn name(self, name: impl Into<String>) -> LoggerBuilder<Named> {
        let Self { level, directives, file, .. } = self;
        LoggerBuilder { name: Named(name.into()), level, directives, file }
    }
}

impl<N> LoggerBuilder<N> {
    /// Level applied where no directive matches.
    #[must_use]
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Per-target directives such as `capable_notifications=debug`.
    ///
    /// When unset, `RUST_LOG` is read instead.
    #[must_use]
    pub fn filter(mut self, directives: impl Into<String>) -> Self {
        self.directives = Some(directives.into());
        self
    }

    /// Also writes to daily rotated files in `dir`, as JSON lines when `json` is set.
    #[must_use]
    pub fn file(mut self, dir: impl Into<PathBuf>, json: bool) -> Self {
        self.file = Some(FileOutput { dir: dir.into(), json });
        self
    }
}

impl LoggerBuilder<Named> {
    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive: it owns the file writer.
    ///
    /// # Errors
    /// * [`LoggerError::InvalidConfiguration`] for a blank name or bad directives.
    /// * [`LoggerError::Io`] or [`LoggerError::Appender`] if the log directory is unusable.
    /// * [`LoggerError::Subscriber`] if a global subscriber is already installed.
    pub fn init(self) -> Result<Logger, LoggerError> {
        let Self { name: Named(name), level, directives, file } = self;
        if name.trim().is_empty() {
            return Err(LoggerError::InvalidConfiguration {
                message: "Logger name cannot be empty".into(),
                context: None,
            });
        }

        let filter = build_filter(level, directives.as_deref())?;
        let console = layer().compact().with_writer(std::io::stderr);

        let (file_layer, guard) = match file {
            Some(FileOutput { dir, json }) => {
                fs::create_dir_all(&dir)
                    .context(format!("Creating log directory {}", dir.display()))?;

                let appender = RollingFileAppender::builder()
                    .rotation(Rotation::DAILY)
                    .filename_prefix(&name)
                    .filename_suffix("log")
                    .max_log_files(KEPT_LOG_FILES)
                    .build(&dir)
                    .context("Building rolling file appender")?;

                let (writer, guard) = tracing_appender::non_blocking(appender);
                let plain = layer().with_writer(writer).with_ansi(false);
                let boxed = if json { plain.json().boxed() } else { plain.boxed() };
                (Some(boxed), Some(guard))
            },
            None => (None, None),
        };

        tracing_subscriber::registry().with(filter).with(console).with(file_layer).try_init()?;
        tracing::debug!(logger = %name, file = guard.is_some(), "Logger initialized");

        Ok(Logger { guard })
    }
}

/// Installed subscriber; dropping it flushes and stops file output.
#[must_use = "Dropping this handle stops the background log writer."]
#[derive(Debug)]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    pub const fn builder() -> LoggerBuilder {
        LoggerBuilder { name: Unnamed, level: LevelFilter::INFO, directives: None, file: None }
    }

    /// Whether file output is active.
    #[must_use]
    pub const fn writes_files(&self) -> bool {
        self.guard.is_some()
    }
}

/// Parses `trace`, `debug`, `info`, `warn`, `error` or `off`, ignoring case.
///
/// # Errors
/// Returns [`LoggerError::InvalidConfiguration`] for anything else.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    LevelFilter::from_str(level.trim()).map_err(|_| LoggerError::InvalidConfiguration {
        message: format!("Unknown log level '{level}'").into(),
        context: None,
    })
}

fn build_filter(level: LevelFilter, directives: Option<&str>) -> Result<EnvFilter, LoggerError> {
    let builder = EnvFilter::builder().with_default_directive(level.into());
    let Some(directives) = directives else {
        return Ok(builder.from_env_lossy());
    };

    builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("Invalid filter '{directives}': {e}").into(),
        context: None,
    })
}
