use anyhow::{Context, Result};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::{LogRotation, LoggingConfig};

/// Install console and log file output; `RUST_LOG` overrides the default level
pub fn init(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    std::fs::create_dir_all(&config.directory)
        .with_context(|| format!("Failed to create log directory {}", config.directory.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(rotation(config.rotation))
        .filename_prefix(config.file_name.as_str())
        .build(&config.directory)
        .context("Failed to open log file")?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stdout))
        .with(fmt::layer().with_ansi(false).with_writer(file_appender))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

fn rotation(rotation: LogRotation) -> Rotation {
    match rotation {
        LogRotation::Never => Rotation::NEVER,
        LogRotation::Hourly => Rotation::HOURLY,
        LogRotation::Daily => Rotation::DAILY,
    }
}
