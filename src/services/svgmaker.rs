//! Remote call adapter for the SVGMaker service.
//!
//! [`SvgMakerApi`] is the transport seam (HTTP in production, scripted fakes
//! in tests). [`SvgMakerService`] sits on top of it, bounds each exchange
//! with a timeout and folds "succeeded but returned no SVG" into the same
//! failure class as a failed call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{ConvertParams, EditParams, GenerateParams, SvgRequest, SvgResponse};

/// Default bound on one remote exchange.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or protocol failure before a response was received.
    #[error("Request to SVGMaker API failed: {0}")]
    Transport(String),

    /// The service answered with an error.
    #[error("SVGMaker API returned status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode SVGMaker API response: {0}")]
    Decode(String),

    #[error("SVGMaker API request timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),

    /// The call succeeded but carried no usable SVG markup.
    #[error("SVGMaker API did not return SVG content.")]
    NoSvgContent,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

/// One request/response exchange with the SVGMaker service.
#[async_trait]
pub trait SvgMakerApi: Send + Sync {
    /// Wait for a local request slot. Not counted against the request timeout.
    async fn reserve(&self) {}

    async fn send(&self, request: SvgRequest) -> Result<SvgResponse, ApiError>;
}

/// Normalizing wrapper used by the tool handlers.
///
/// Stateless per call; one instance is shared by every invocation.
pub struct SvgMakerService {
    api: Arc<dyn SvgMakerApi>,
    timeout: Duration,
}

impl SvgMakerService {
    pub fn new(api: Arc<dyn SvgMakerApi>, timeout: Duration) -> Self {
        Self { api, timeout }
    }

    pub async fn generate(&self, params: GenerateParams) -> Result<String, ApiError> {
        self.execute(SvgRequest::Generate(params)).await
    }

    pub async fn edit(&self, params: EditParams) -> Result<String, ApiError> {
        self.execute(SvgRequest::Edit(params)).await
    }

    pub async fn convert(&self, params: ConvertParams) -> Result<String, ApiError> {
        self.execute(SvgRequest::Convert(params)).await
    }

    async fn execute(&self, request: SvgRequest) -> Result<String, ApiError> {
        let operation = request.operation();
        tracing::debug!(operation, "Sending SVGMaker request");

        self.api.reserve().await;
        let response = tokio::time::timeout(self.timeout, self.api.send(request))
            .await
            .map_err(|_| ApiError::Timeout(self.timeout))??;

        if let Some(cost) = response.credit_cost {
            tracing::debug!(operation, credit_cost = cost, "SVGMaker request completed");
        }

        match response.svg_text {
            Some(svg) if !svg.trim().is_empty() => Ok(svg),
            _ => Err(ApiError::NoSvgContent),
        }
    }
}
