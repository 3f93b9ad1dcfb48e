//! HTTP transport for the SVGMaker API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::models::{
    AspectRatio, Background, ConvertParams, EditParams, GenerateParams, ImageUpload, Quality,
    StyleParams, SvgRequest, SvgResponse,
};
use crate::services::svgmaker::{ApiError, SvgMakerApi};

pub const DEFAULT_BASE_URL: &str = "https://api.svgmaker.io";

const GENERATE_PATH: &str = "/v1/generate";
const EDIT_PATH: &str = "/v1/edit";
const CONVERT_PATH: &str = "/v1/convert/ai-vectorize";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Spaces outbound requests to honor a requests-per-minute limit.
///
/// Shared across concurrent tool calls; callers queue on the inner mutex.
pub struct Throttle {
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

impl Throttle {
    pub fn per_minute(requests_per_minute: u32) -> Self {
        Self {
            min_interval: Duration::from_secs(60) / requests_per_minute.max(1),
            last_request: Mutex::new(None),
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Wait until the next request slot is available, then claim it.
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let ready_at = previous + self.min_interval;
            if ready_at > Instant::now() {
                tracing::debug!(
                    wait_ms = (ready_at - Instant::now()).as_millis() as u64,
                    "Rate limit reached, delaying SVGMaker request"
                );
                tokio::time::sleep_until(ready_at).await;
            }
        }
        *last = Some(Instant::now());
    }
}

/// [`SvgMakerApi`] over HTTPS with the `reqwest` client.
pub struct HttpSvgMakerApi {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    throttle: Throttle,
}

impl HttpSvgMakerApi {
    pub fn new(
        api_key: impl Into<String>,
        base_url: &str,
        requests_per_minute: u32,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(concat!("svgmaker-mcp/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            throttle: Throttle::per_minute(requests_per_minute),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl SvgMakerApi for HttpSvgMakerApi {
    async fn reserve(&self) {
        self.throttle.acquire().await;
    }

    async fn send(&self, request: SvgRequest) -> Result<SvgResponse, ApiError> {
        let builder = match request {
            SvgRequest::Generate(params) => self
                .client
                .post(self.endpoint(GENERATE_PATH))
                .json(&GenerateBody::from(&params)),
            SvgRequest::Edit(params) => self
                .client
                .post(self.endpoint(EDIT_PATH))
                .multipart(edit_form(params)?),
            SvgRequest::Convert(params) => self
                .client
                .post(self.endpoint(CONVERT_PATH))
                .multipart(convert_form(params)?),
        };

        let response = builder.header("x-api-key", &self.api_key).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        parse_body(status, &body)
    }
}

/// JSON body for the generate endpoint. `svgText` is always requested.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody<'a> {
    prompt: &'a str,
    quality: Quality,
    aspect_ratio: AspectRatio,
    background: Background,
    #[serde(skip_serializing_if = "StyleParams::is_empty")]
    style_params: StyleParams,
    svg_text: bool,
}

impl<'a> From<&'a GenerateParams> for GenerateBody<'a> {
    fn from(params: &'a GenerateParams) -> Self {
        Self {
            prompt: &params.prompt,
            quality: params.quality,
            aspect_ratio: params.aspect_ratio,
            background: params.background,
            style_params: params.style,
            svg_text: true,
        }
    }
}

fn edit_form(params: EditParams) -> Result<Form, ApiError> {
    let mut form = Form::new()
        .text("prompt", params.prompt)
        .text("quality", wire_name(&params.quality))
        .text("aspectRatio", wire_name(&params.aspect_ratio))
        .text("background", wire_name(&params.background))
        .text("svgText", "true")
        .part("image", upload_part(params.image)?);
    if !params.style.is_empty() {
        let style = serde_json::to_string(&params.style)
            .map_err(|e| ApiError::Transport(format!("Failed to encode style params: {}", e)))?;
        form = form.text("styleParams", style);
    }
    Ok(form)
}

fn convert_form(params: ConvertParams) -> Result<Form, ApiError> {
    Ok(Form::new()
        .text("svgText", "true")
        .part("file", upload_part(params.file)?))
}

fn upload_part(upload: ImageUpload) -> Result<Part, ApiError> {
    Ok(Part::bytes(upload.bytes)
        .file_name(upload.file_name)
        .mime_str(upload.mime_type)?)
}

/// Serde wire name of a unit enum value.
fn wire_name<T: Serialize>(value: &T) -> String {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::String(name)) => name,
        Ok(other) => other.to_string(),
        Err(_) => String::new(),
    }
}

#[derive(Debug, Deserialize)]
struct ApiEnvelope {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    data: Option<SvgResponse>,
    #[serde(default)]
    error: Option<ApiFailure>,
    #[serde(default)]
    message: Option<String>,
    #[serde(flatten)]
    inline: SvgResponse,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ApiFailure {
    Message(String),
    Detailed { message: String },
    Other(serde_json::Value),
}

impl ApiEnvelope {
    fn failure_message(&self) -> Option<String> {
        match &self.error {
            Some(ApiFailure::Message(message)) | Some(ApiFailure::Detailed { message }) => {
                Some(message.clone())
            }
            Some(ApiFailure::Other(_)) | None => self.message.clone(),
        }
    }
}

/// Map a raw HTTP response onto the service payload.
///
/// Accepts both `{ "data": { "svgText": .. } }` and a bare payload.
fn parse_body(status: u16, body: &str) -> Result<SvgResponse, ApiError> {
    let envelope = serde_json::from_str::<ApiEnvelope>(body);

    if !(200..300).contains(&status) {
        let message = envelope
            .ok()
            .and_then(|e| e.failure_message())
            .unwrap_or_else(|| body_excerpt(body));
        return Err(ApiError::Status { status, message });
    }

    let envelope = envelope.map_err(|e| ApiError::Decode(e.to_string()))?;
    if envelope.success == Some(false) {
        let message = envelope
            .failure_message()
            .unwrap_or_else(|| "request was not successful".to_string());
        return Err(ApiError::Status { status, message });
    }

    Ok(envelope.data.unwrap_or(envelope.inline))
}

fn body_excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "empty response body".to_string()
    } else {
        trimmed.chars().take(200).collect()
    }
}
