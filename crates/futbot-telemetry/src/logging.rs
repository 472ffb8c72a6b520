//! Structured logging initialization.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{TelemetryError, TelemetryResult};

/// Logging configuration (`[logging]` in the config file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Append-only log file. Omit to disable file logging.
    #[serde(default = "default_log_file")]
    pub file: Option<PathBuf>,
    /// Filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,
    /// JSON lines in the log file instead of plain text.
    #[serde(default)]
    pub json: bool,
}

fn default_log_file() -> Option<PathBuf> {
    Some(PathBuf::from("bot.log"))
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: default_log_file(),
            level: default_level(),
            json: false,
        }
    }
}

/// Console output options, decided by the binary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsoleOptions {
    /// Echo log events to stderr. Off, the operator only sees what the
    /// binary prints itself.
    pub verbose: bool,
    /// ANSI colour on the console layer.
    pub ansi: bool,
}

impl ConsoleOptions {
    /// Level of the stderr layer, `None` when there is no console layer.
    pub fn level(&self) -> Option<LevelFilter> {
        self.verbose.then_some(LevelFilter::TRACE)
    }
}

/// JSON file output when configured, or when `RUST_ENV` is `production`.
pub fn wants_json(config: &LoggingConfig, rust_env: Option<&str>) -> bool {
    config.json || rust_env == Some("production")
}

/// Open `path` for appending, creating it if needed.
pub fn open_log_file(path: &Path) -> TelemetryResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| TelemetryError::LogFile {
            path: path.display().to_string(),
            source,
        })
}

/// Layer writing every event to `file`, plain text or JSON lines.
pub fn file_layer<S>(file: File, json: bool) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a> + 'static,
{
    if json {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(Mutex::new(file))
            .boxed()
    } else {
        fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_writer(Mutex::new(file))
            .boxed()
    }
}

/// Initialize logging.
///
/// - File layer: every event passing the filter (see [`wants_json`]).
/// - Console layer (stderr): only with `console.verbose`.
///
/// Must be called at most once per process.
pub fn init_logging(config: &LoggingConfig, console: ConsoleOptions) -> TelemetryResult<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            TelemetryError::LoggingInit(format!("invalid level '{}': {e}", config.level))
        })?,
    };

    let rust_env = std::env::var("RUST_ENV").ok();
    let json = wants_json(config, rust_env.as_deref());
    let file_output = config
        .file
        .as_deref()
        .map(open_log_file)
        .transpose()?
        .map(|file| file_layer(file, json));

    let console_layer = console.level().map(|level| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(console.ansi)
            .with_target(false)
            .without_time()
            .with_filter(level)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_output)
        .with(console_layer)
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))
}
