//! Tracing subscriber setup

use std::path::PathBuf;

use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("invalid log file path: {}", .0.display())]
    FilePath(PathBuf),

    #[error("failed to open log file: {0}")]
    File(#[from] InitError),

    #[error("failed to install tracing subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Build the filter: `RUST_LOG` when set, the configured level otherwise
fn build_filter(config: &LoggingConfig) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => Ok(EnvFilter::try_new(&config.level)?),
    }
}

/// Build the writer for log output.
///
/// Logs go to stderr unless a file is configured, in which case writes are
/// handed to a background thread. The returned guard flushes that thread on drop.
fn build_writer(config: &LoggingConfig) -> Result<(BoxMakeWriter, Option<WorkerGuard>), LoggingError> {
    let Some(path) = &config.file else {
        return Ok((BoxMakeWriter::new(std::io::stderr), None));
    };

    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LoggingError::FilePath(path.clone()))?;
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| std::path::Path::new("."));

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)?;
    let (writer, guard) = tracing_appender::non_blocking(appender);

    Ok((BoxMakeWriter::new(writer), Some(guard)))
}

/// Install the global tracing subscriber.
///
/// Keep the returned guard alive for the lifetime of the process when logging
/// to a file, otherwise buffered lines may be lost.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = build_filter(config)?;
    let (writer, guard) = build_writer(config)?;

    if config.json {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(writer).with_target(true))
            .try_init()?;
    }

    Ok(guard)
}
