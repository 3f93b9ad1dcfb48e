//! Tracing setup and session banners.
//!
//! Stdout carries the MCP framing, so logs never go there: stderr by
//! default, or a per-session file when debug logging is on.

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Facts about the running logging session, for the start and end banners.
#[derive(Debug, Clone)]
pub struct LogSession {
    pub started: DateTime<Utc>,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

/// `<cache dir>/svgmaker-mcp/logs`, or `./logs` when there is no cache dir.
pub fn default_log_dir() -> PathBuf {
    dirs::cache_dir()
        .map(|dir| dir.join("svgmaker-mcp").join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"))
}

pub fn log_file_name(started: DateTime<Utc>) -> String {
    format!("mcp-debug-{}.log", started.format("%Y-%m-%dT%H-%M-%S-%3fZ"))
}

/// Create the log directory if needed and open a fresh session log file.
pub fn open_log_file(dir: &Path, started: DateTime<Utc>) -> std::io::Result<(PathBuf, File)> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(log_file_name(started));
    let file = File::create(&path)?;
    Ok((path, file))
}

/// Install the global subscriber.
///
/// In debug mode the filter is raised to `debug` and output goes to a log
/// file. If the file cannot be created, logging stays on stderr.
pub fn init_tracing(debug: bool, log_dir: Option<&Path>) -> Result<LogSession> {
    let started = Utc::now();
    let level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::from_default_env().add_directive(format!("svgmaker_mcp={}", level).parse()?);

    if debug {
        let dir = log_dir.map(Path::to_path_buf).unwrap_or_else(default_log_dir);
        match open_log_file(&dir, started) {
            Ok((path, file)) => {
                tracing_subscriber::fmt()
                    .with_env_filter(filter)
                    .with_writer(Mutex::new(file))
                    .with_ansi(false)
                    .init();
                return Ok(LogSession {
                    started,
                    log_file: Some(path),
                    debug,
                });
            }
            Err(e) => {
                eprintln!(
                    "Failed to create log file in {}: {}, logging to stderr",
                    dir.display(),
                    e
                );
            }
        }
    }

    // Tracing to stderr (safe for MCP stdio transport)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    Ok(LogSession {
        started,
        log_file: None,
        debug,
    })
}

impl LogSession {
    pub fn log_start(&self) {
        tracing::info!(
            version = env!("CARGO_PKG_VERSION"),
            debug = self.debug,
            log_file = ?self.log_file,
            "=== svgmaker-mcp session started at {} ===",
            self.started.to_rfc3339()
        );
    }

    pub fn log_end(&self) {
        let elapsed = Utc::now().signed_duration_since(self.started);
        tracing::info!(
            "=== svgmaker-mcp session ended (duration: {:.1}s) ===",
            elapsed.num_milliseconds() as f64 / 1000.0
        );
    }
}

pub fn log_fatal(err: &anyhow::Error) {
    tracing::error!("Fatal error: {:#}", err);
}
