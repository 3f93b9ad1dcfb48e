//! Command-line and environment configuration for the server.

use clap::Parser;
use std::path::PathBuf;

use crate::services::DEFAULT_BASE_URL;

/// svgmaker-mcp - MCP server for SVGMaker generate, edit and convert tools
#[derive(Parser, Debug, Clone)]
#[command(name = "svgmaker-mcp", version, about, long_about = None)]
pub struct Cli {
    /// SVGMaker API key (required)
    #[arg(long, env = "SVGMAKER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Maximum SVGMaker requests per minute
    #[arg(
        long,
        env = "SVGMAKER_RATE_LIMIT_RPM",
        default_value_t = 2,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub rate_limit_rpm: u32,

    /// SVGMaker API base URL
    #[arg(long, env = "SVGMAKER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Timeout for a single SVGMaker request, in seconds
    #[arg(
        long,
        env = "SVGMAKER_TIMEOUT_SECS",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_secs: u64,

    /// Seconds between simulated progress notifications while processing
    #[arg(
        long,
        env = "SVGMAKER_PROGRESS_INTERVAL_SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub progress_interval_secs: u64,

    /// Write debug logs to a session log file instead of stderr
    #[arg(long, env = "SVGMAKER_DEBUG")]
    pub debug: bool,

    /// Directory for debug log files (default: platform cache dir)
    #[arg(long, env = "SVGMAKER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,
}
