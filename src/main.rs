//! svgmaker-mcp - MCP server for the SVGMaker API
//!
//! Usage:
//!   SVGMAKER_API_KEY=... svgmaker-mcp          Serve on stdio
//!   svgmaker-mcp --debug --log-dir ./logs      Debug logging to a file
//!   svgmaker-mcp --help                        Show all options

use std::process::ExitCode;

use clap::Parser;

use svgmaker_mcp::cli::Cli;
use svgmaker_mcp::init::{AppConfig, AppContext};
use svgmaker_mcp::logging::{init_tracing, log_fatal};
use svgmaker_mcp::mcp::run_mcp_server;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let session = match init_tracing(cli.debug, cli.log_dir.as_deref()) {
        Ok(session) => session,
        Err(e) => {
            eprintln!("Failed to initialize logging: {:#}", e);
            return ExitCode::FAILURE;
        }
    };
    session.log_start();

    let config = match AppConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            if session.log_file.is_some() {
                eprintln!("Error: {}", e);
            }
            return ExitCode::FAILURE;
        }
    };

    let result = match AppContext::new(config) {
        Ok(ctx) => run_mcp_server(ctx).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => {
            session.log_end();
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_fatal(&e);
            session.log_end();
            ExitCode::FAILURE
        }
    }
}
