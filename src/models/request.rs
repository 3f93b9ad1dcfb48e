//! Normalized requests and responses exchanged with the SVGMaker service.
//!
//! Tool arguments are validated once and turned into one of these variants;
//! nothing downstream re-interprets raw JSON.

use std::path::Path;

use serde::Deserialize;

use super::options::{AspectRatio, Background, Quality, StyleParams};

/// Text-to-SVG generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateParams {
    pub prompt: String,
    pub quality: Quality,
    pub aspect_ratio: AspectRatio,
    pub background: Background,
    pub style: StyleParams,
}

/// Edit an existing image with a text instruction.
#[derive(Debug, Clone, PartialEq)]
pub struct EditParams {
    pub image: ImageUpload,
    pub prompt: String,
    pub quality: Quality,
    pub aspect_ratio: AspectRatio,
    pub background: Background,
    pub style: StyleParams,
}

/// Raster-to-vector conversion request.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub file: ImageUpload,
}

/// An input file uploaded alongside an edit or convert request.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Wrap file contents, deriving the upload name and MIME type from `path`.
    pub fn from_path(path: &Path, bytes: Vec<u8>) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        Self {
            file_name,
            mime_type: mime_for_path(path),
            bytes,
        }
    }
}

/// MIME type for an image path, by extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("tif") | Some("tiff") => "image/tiff",
        _ => "application/octet-stream",
    }
}

/// One outbound SVGMaker request.
#[derive(Debug, Clone, PartialEq)]
pub enum SvgRequest {
    Generate(GenerateParams),
    Edit(EditParams),
    Convert(ConvertParams),
}

impl SvgRequest {
    pub fn operation(&self) -> &'static str {
        match self {
            SvgRequest::Generate(_) => "generate",
            SvgRequest::Edit(_) => "edit",
            SvgRequest::Convert(_) => "convert",
        }
    }
}

/// Payload returned by the service for any of the three operations.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SvgResponse {
    #[serde(default)]
    pub svg_text: Option<String>,
    #[serde(default)]
    pub svg_url: Option<String>,
    #[serde(default)]
    pub credit_cost: Option<f64>,
}

impl SvgResponse {
    pub fn with_svg(svg: impl Into<String>) -> Self {
        Self {
            svg_text: Some(svg.into()),
            ..Default::default()
        }
    }
}
