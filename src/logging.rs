//! Structured logging via `tracing`. The terminal belongs to ratatui for the
//! whole session, so events always go to a file.

use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogConfig;

/// Install the global subscriber. Call once at startup; a config without a
/// log file leaves logging disabled.
pub fn init_logging(config: &LogConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).context("failed to create log directory")?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(build_env_filter(config))
        .with(layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!(path = %path.display(), "logging initialised");
    Ok(())
}

fn build_env_filter(config: &LogConfig) -> EnvFilter {
    let fallback = || EnvFilter::default().add_directive(config.level_filter.into());
    if config.use_env_filter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    } else {
        fallback()
    }
}
