//! Logging context for one run.
//!
//! Every sink carries its own minimum level, so the log file can always capture DEBUG
//! while the console follows `--verbose`. File sinks go through flexi_logger's
//! size-rotating writer.

use flexi_logger::writers::{ArcFileLogWriter, FileLogWriter, FileLogWriterHandle};
use flexi_logger::{Cleanup, Criterion, FileSpec, Naming};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, Registry};

use crate::error::{AppError, AppResult};
use crate::infrastructure::config::LogFormat;

const CRATE_TARGET: &str = "freshrss_to_karakeep";
const DEFAULT_MAX_LOG_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_MAX_LOG_FILES: usize = 5;
// Empty current infix keeps live output at the configured path
const LOG_FILE_NAMING: Naming = Naming::TimestampsCustomFormat {
    current_infix: Some(""),
    format: "r%Y-%m-%d_%H-%M-%S",
};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum LogDestination {
    Console,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LogSink {
    pub destination: LogDestination,
    pub min_level: Level,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationPolicy {
    pub max_bytes: u64,
    pub keep_files: usize,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_LOG_FILE_SIZE_BYTES,
            keep_files: DEFAULT_MAX_LOG_FILES,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    pub sinks: Vec<LogSink>,
    pub rotation: RotationPolicy,
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Console at INFO (DEBUG when verbose) plus a DEBUG log file
    pub fn for_cli(verbose: bool, log_file: impl Into<PathBuf>, format: LogFormat) -> Self {
        let console_level = if verbose { Level::DEBUG } else { Level::INFO };
        Self {
            sinks: vec![
                LogSink {
                    destination: LogDestination::File(log_file.into()),
                    min_level: Level::DEBUG,
                },
                LogSink {
                    destination: LogDestination::Console,
                    min_level: console_level,
                },
            ],
            rotation: RotationPolicy::default(),
            format,
        }
    }
}

/// Keeps file writers alive; dropping it flushes and closes the log files
pub struct LoggingGuard {
    _file_handles: Vec<FileLogWriterHandle>,
}

/// Install the global subscriber described by `config`
pub fn init_logging(config: &LoggingConfig) -> AppResult<LoggingGuard> {
    let mut layers: Vec<BoxedLayer> = Vec::with_capacity(config.sinks.len());
    let mut file_handles = Vec::new();

    for sink in &config.sinks {
        match &sink.destination {
            LogDestination::Console => {
                // RUST_LOG, when set, takes over the console filter
                let filter = EnvFilter::try_from_default_env()
                    .or_else(|_| sink_filter(sink.min_level))?;
                let layer: BoxedLayer = match config.format {
                    LogFormat::Json => tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr)
                        .with_filter(filter)
                        .boxed(),
                    LogFormat::Pretty => tracing_subscriber::fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_filter(filter)
                        .boxed(),
                };
                layers.push(layer);
            }
            LogDestination::File(path) => {
                let (writer, handle) = rotating_file_writer(path, config.rotation)?;
                let layer = tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(move || writer.clone())
                    .with_filter(sink_filter(sink.min_level)?)
                    .boxed();
                layers.push(layer);
                file_handles.push(handle);
            }
        }
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| AppError::Logging(e.to_string()))?;

    Ok(LoggingGuard {
        _file_handles: file_handles,
    })
}

/// Our own events at `level`, everything else capped at WARN
fn sink_filter(level: Level) -> AppResult<EnvFilter> {
    let level = level.as_str().to_ascii_lowercase();
    EnvFilter::try_new(format!("warn,{}={}", CRATE_TARGET, level))
        .map_err(|e| AppError::Logging(e.to_string()))
}

/// Append-only writer on `path` rotating by size.
///
/// Rotation renames the full file to `<stem>_r<timestamp>.<ext>` and reopens `path`;
/// only `rotation.keep_files` rotated files are kept.
pub fn rotating_file_writer(
    path: &Path,
    rotation: RotationPolicy,
) -> AppResult<(ArcFileLogWriter, FileLogWriterHandle)> {
    let file_spec = FileSpec::try_from(path)
        .map_err(|e| AppError::Logging(format!("invalid log file {}: {}", path.display(), e)))?
        .suppress_timestamp();

    FileLogWriter::builder(file_spec)
        .rotate(
            Criterion::Size(rotation.max_bytes),
            LOG_FILE_NAMING,
            Cleanup::KeepLogFiles(rotation.keep_files),
        )
        .append()
        .try_build_with_handle()
        .map_err(|e| AppError::Logging(format!("failed to open {}: {}", path.display(), e)))
}
