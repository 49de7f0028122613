//! Subscriber setup for applications that embed the validator.
//!
//! The library crates only emit `tracing` events:
//!
//! - `warn`: an expectation could not be evaluated and was recorded as failed
//! - `info`: aggregate outcomes such as a failed `raise_if_invalid`
//! - `debug`: one event per evaluated expectation
//! - `trace`: skipped expectations
//!
//! Call [`init_logging`] once at startup to see them.

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Targets that follow the configured level. Everything else logs at `warn`.
const VALIDATOR_TARGETS: [&str; 4] = ["dfv_common", "dfv_model", "dfv_report", "dfv_validate"];

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("a global tracing subscriber is already installed")]
    AlreadyInitialized(#[from] TryInitError),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-field human-readable lines.
    #[default]
    Pretty,
    Compact,
    /// One JSON object per event.
    Json,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level: Level,
    pub format: LogFormat,
    pub timestamps: bool,
    pub show_target: bool,
    pub ansi: bool,
    /// Append to this file instead of writing to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::Pretty,
            timestamps: false,
            show_target: false,
            ansi: true,
            file: None,
        }
    }
}

impl LogConfig {
    /// Level from a `-v` count: warn, info, debug, then trace.
    #[must_use]
    pub fn from_verbosity(count: u8) -> Self {
        let level = [Level::WARN, Level::INFO, Level::DEBUG]
            .get(usize::from(count))
            .copied()
            .unwrap_or(Level::TRACE);
        Self::default().with_level(level)
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, enable: bool) -> Self {
        self.timestamps = enable;
        self
    }

    #[must_use]
    pub fn with_target(mut self, enable: bool) -> Self {
        self.show_target = enable;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.ansi = enable;
        self
    }

    #[must_use]
    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.file = path;
        self
    }
}

/// Install the global subscriber, writing to stderr or the configured file.
///
/// # Errors
///
/// Fails if the log file cannot be opened or a global subscriber already
/// exists.
pub fn init_logging(config: &LogConfig) -> Result<(), LoggingError> {
    let Some(path) = &config.file else {
        return init_logging_with_writer(config, io::stderr);
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::LogFile {
            path: path.clone(),
            source,
        })?;
    init_logging_with_writer(config, Mutex::new(file))
}

/// Install the global subscriber with an arbitrary writer.
///
/// # Errors
///
/// Fails if a global subscriber already exists.
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> Result<(), LoggingError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(output_layer(config, writer))
        .with(env_filter(config.level))
        .try_init()?;
    Ok(())
}

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

fn output_layer<W>(config: &LogConfig, writer: W) -> BoxedLayer
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let base = fmt::layer()
        .with_writer(writer)
        .with_target(config.show_target);
    match (config.format, config.timestamps) {
        (LogFormat::Json, _) => base.json().boxed(),
        (LogFormat::Compact, true) => base.compact().with_ansi(config.ansi).boxed(),
        (LogFormat::Compact, false) => base
            .compact()
            .with_ansi(config.ansi)
            .without_time()
            .boxed(),
        (LogFormat::Pretty, true) => base.with_ansi(config.ansi).boxed(),
        (LogFormat::Pretty, false) => base.with_ansi(config.ansi).without_time().boxed(),
    }
}

/// `RUST_LOG` overrides the configured level when set.
fn env_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives(level)))
}

fn directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    std::iter::once("warn".to_string())
        .chain(VALIDATOR_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}
