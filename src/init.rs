//! Configuration and the composition root for the MCP server.

use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::cli::Cli;
use crate::services::{HttpSvgMakerApi, SvgMakerApi, SvgMakerService};
use crate::utils::paths::PathResolver;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("SVGMAKER_API_KEY is not set. Provide it via the environment or --api-key.")]
    MissingApiKey,
}

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub api_key: String,
    pub base_url: String,
    pub rate_limit_rpm: u32,
    pub request_timeout: Duration,
    pub progress_interval: Duration,
}

impl AppConfig {
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let api_key = cli
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        Ok(Self {
            api_key: api_key.to_string(),
            base_url: cli.base_url.trim_end_matches('/').to_string(),
            rate_limit_rpm: cli.rate_limit_rpm.max(1),
            request_timeout: Duration::from_secs(cli.timeout_secs),
            progress_interval: Duration::from_secs(cli.progress_interval_secs),
        })
    }
}

/// Application context holding the shared SVGMaker client.
///
/// Built once at startup and handed to the server; there is no global client.
pub struct AppContext {
    pub config: AppConfig,
    pub service: Arc<SvgMakerService>,
    pub resolver: Arc<PathResolver>,
}

impl AppContext {
    /// Initialize application context with the HTTP client.
    pub fn new(config: AppConfig) -> Result<Self> {
        let api = HttpSvgMakerApi::new(
            config.api_key.clone(),
            &config.base_url,
            config.rate_limit_rpm,
        )?;
        tracing::info!(
            "SVGMaker client configured ({}, {} requests/min)",
            config.base_url,
            config.rate_limit_rpm
        );
        Ok(Self::with_api(config, Arc::new(api)))
    }

    /// Context over any API implementation.
    pub fn with_api(config: AppConfig, api: Arc<dyn SvgMakerApi>) -> Self {
        let service = Arc::new(SvgMakerService::new(api, config.request_timeout));
        Self {
            config,
            service,
            resolver: Arc::new(PathResolver::default()),
        }
    }
}
