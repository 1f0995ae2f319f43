//! File logging for the terminal client.
//!
//! Stdout belongs to the game, so tracing output goes to a per-session file.
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const LOG_DIR_VAR: &str = "MATHGAME_LOG_DIR";

/// Installs the global subscriber. Keep the returned guard alive until exit so
/// buffered lines are flushed.
pub fn setup_logging() -> Result<WorkerGuard> {
    let log_dir = log_directory();

    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or_default();
    let session_id = format!("session_{timestamp}");

    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_name = format!("{session_id}.log");
    let file_appender = tracing_appender::rolling::never(&log_dir, &file_name);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::info!("Log file: {}", log_dir.join(&file_name).display());

    Ok(guard)
}

/// `MATHGAME_LOG_DIR` when set, otherwise the platform cache directory.
fn log_directory() -> PathBuf {
    if let Some(dir) = std::env::var_os(LOG_DIR_VAR) {
        return PathBuf::from(dir);
    }

    directories::ProjectDirs::from("", "", "mathgame")
        .map(|dirs| dirs.cache_dir().join("logs"))
        .unwrap_or_else(|| std::env::temp_dir().join("mathgame").join("logs"))
}
