//! Rendering options accepted by the SVGMaker generate and edit endpoints.
//!
//! The same enums back the MCP tool input schemas and the outbound API
//! payloads, so their serde names are the wire names.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Quality level requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Low,
    #[default]
    Medium,
    High,
}

/// Aspect ratio sent to the service. `Auto` lets the service decide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum AspectRatio {
    #[default]
    Auto,
    Square,
    Portrait,
    Landscape,
}

/// Aspect ratios a caller may request explicitly when generating.
///
/// Generation has no explicit `auto`; it is only ever derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GenerateAspectRatio {
    Square,
    Portrait,
    Landscape,
}

impl From<GenerateAspectRatio> for AspectRatio {
    fn from(ratio: GenerateAspectRatio) -> Self {
        match ratio {
            GenerateAspectRatio::Square => AspectRatio::Square,
            GenerateAspectRatio::Portrait => AspectRatio::Portrait,
            GenerateAspectRatio::Landscape => AspectRatio::Landscape,
        }
    }
}

/// Background treatment of the generated SVG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Background {
    #[default]
    Auto,
    Transparent,
    Opaque,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Minimalist,
    Cartoon,
    Realistic,
    Abstract,
    Flat,
    Isometric,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum ColorMode {
    #[serde(rename = "monochrome")]
    Monochrome,
    #[serde(rename = "2-colors")]
    TwoColors,
    #[serde(rename = "3-colors")]
    ThreeColors,
    #[serde(rename = "full-color")]
    FullColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ImageComplexity {
    Icon,
    Illustration,
    Scene,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Composition {
    CenteredObject,
    RepeatingPattern,
    FullScene,
    ObjectsInGrid,
}

/// How text may appear in the generated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum TextStyle {
    OnlyTitle,
    EmbeddedText,
}

/// Optional style hints, sent to the service as `styleParams`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
pub struct StyleParams {
    /// Overall art style
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Style>,
    /// Color palette restriction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_mode: Option<ColorMode>,
    /// Level of detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_complexity: Option<ImageComplexity>,
    /// Layout of the subject(s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<Composition>,
    /// Text handling
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextStyle>,
}

impl StyleParams {
    pub fn is_empty(&self) -> bool {
        *self == StyleParams::default()
    }
}

/// Aspect ratio actually sent for a request.
///
/// An explicit ratio always wins. Otherwise high quality forces a square
/// canvas and every other quality lets the service choose.
pub fn effective_aspect_ratio(
    explicit: Option<AspectRatio>,
    quality: Option<Quality>,
) -> AspectRatio {
    match (explicit, quality) {
        (Some(ratio), _) => ratio,
        (None, Some(Quality::High)) => AspectRatio::Square,
        (None, _) => AspectRatio::Auto,
    }
}
