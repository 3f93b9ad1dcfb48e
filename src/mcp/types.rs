use std::path::Path;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::models::{
    effective_aspect_ratio, AspectRatio, Background, GenerateAspectRatio, GenerateParams,
    ImageUpload, Quality, StyleParams,
};
use crate::services::PhaseMessages;
use crate::SvgMakerError;

pub const GENERATE_TOOL: &str = "svgmaker_generate";
pub const EDIT_TOOL: &str = "svgmaker_edit";
pub const CONVERT_TOOL: &str = "svgmaker_convert";

/// The three tool operations this server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Generate,
    Edit,
    Convert,
}

impl Operation {
    pub const ALL: [Operation; 3] = [Operation::Generate, Operation::Edit, Operation::Convert];

    pub fn from_tool_name(name: &str) -> Option<Self> {
        match name {
            GENERATE_TOOL => Some(Operation::Generate),
            EDIT_TOOL => Some(Operation::Edit),
            CONVERT_TOOL => Some(Operation::Convert),
            _ => None,
        }
    }

    pub fn tool_name(self) -> &'static str {
        match self {
            Operation::Generate => GENERATE_TOOL,
            Operation::Edit => EDIT_TOOL,
            Operation::Convert => CONVERT_TOOL,
        }
    }

    /// Prefix of every error envelope this operation returns.
    pub fn error_prefix(self) -> &'static str {
        match self {
            Operation::Generate => "Error generating SVG",
            Operation::Edit => "Error editing SVG",
            Operation::Convert => "Error converting image to SVG",
        }
    }

    pub fn success_message(self, output: &Path) -> String {
        let lead = match self {
            Operation::Generate => "SVG generated successfully",
            Operation::Edit => "SVG edited successfully",
            Operation::Convert => "Image converted to SVG successfully",
        };
        format!("{} and saved to: {}", lead, output.display())
    }

    pub fn phase_messages(self) -> PhaseMessages {
        let [initial, preparing, processing, saving, complete] = match self {
            Operation::Generate => [
                "Starting SVG generation...",
                "Preparing generation request...",
                "Generating SVG with AI...",
                "Saving SVG file...",
                "SVG generation complete!",
            ],
            Operation::Edit => [
                "Starting SVG edit...",
                "Reading input image...",
                "Editing SVG with AI...",
                "Saving edited SVG...",
                "SVG edit complete!",
            ],
            Operation::Convert => [
                "Starting image conversion...",
                "Reading input image...",
                "Converting image to SVG...",
                "Saving SVG file...",
                "Image conversion complete!",
            ],
        };
        PhaseMessages {
            initial: initial.into(),
            preparing: preparing.into(),
            processing: processing.into(),
            saving: saving.into(),
            complete: complete.into(),
        }
    }
}

/// Arguments for `svgmaker_generate`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerateInput {
    /// Text prompt describing the SVG to generate
    pub prompt: String,
    /// Local file path where the SVG will be saved (must end with .svg)
    pub output_path: String,
    /// Quality level - affects aspect ratio: low/medium use 'auto', high uses 'square'
    #[serde(default)]
    pub quality: Option<Quality>,
    /// Aspect ratio for the generated SVG
    #[serde(default, rename = "aspectRatio")]
    pub aspect_ratio: Option<GenerateAspectRatio>,
    /// Background type (default: auto)
    #[serde(default)]
    pub background: Option<Background>,
    #[serde(flatten)]
    pub style: StyleParams,
}

/// Arguments for `svgmaker_edit`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EditInput {
    /// Absolute file path to the image/SVG to edit
    pub input_path: String,
    /// Instructions describing how to modify the image
    pub prompt: String,
    /// Local file path where the edited SVG will be saved (must end with .svg)
    pub output_path: String,
    /// Quality level - affects aspect ratio: low/medium use 'auto', high uses 'square'
    #[serde(default)]
    pub quality: Option<Quality>,
    /// Aspect ratio for the edited SVG
    #[serde(default, rename = "aspectRatio")]
    pub aspect_ratio: Option<AspectRatio>,
    /// Background type (default: auto)
    #[serde(default)]
    pub background: Option<Background>,
    #[serde(flatten)]
    pub style: StyleParams,
}

/// Arguments for `svgmaker_convert`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ConvertInput {
    /// Absolute file path to the image to convert
    pub input_path: String,
    /// Local file path where the SVG will be saved (must end with .svg)
    pub output_path: String,
}

/// Parameters shared by generate and edit once defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectiveOptions {
    pub quality: Quality,
    pub aspect_ratio: AspectRatio,
    pub background: Background,
}

impl EffectiveOptions {
    pub fn resolve(
        quality: Option<Quality>,
        aspect_ratio: Option<AspectRatio>,
        background: Option<Background>,
    ) -> Self {
        Self {
            quality: quality.unwrap_or_default(),
            aspect_ratio: effective_aspect_ratio(aspect_ratio, quality),
            background: background.unwrap_or_default(),
        }
    }
}

impl GenerateInput {
    pub fn validate(&self) -> Result<(), SvgMakerError> {
        require_non_empty(&self.prompt, "Prompt cannot be empty.")?;
        require_svg_output(&self.output_path)
    }

    pub fn effective_options(&self) -> EffectiveOptions {
        EffectiveOptions::resolve(
            self.quality,
            self.aspect_ratio.map(AspectRatio::from),
            self.background,
        )
    }

    pub fn into_params(self) -> GenerateParams {
        let options = self.effective_options();
        GenerateParams {
            prompt: self.prompt,
            quality: options.quality,
            aspect_ratio: options.aspect_ratio,
            background: options.background,
            style: self.style,
        }
    }
}

impl EditInput {
    pub fn validate(&self) -> Result<(), SvgMakerError> {
        require_input_path(&self.input_path)?;
        require_non_empty(&self.prompt, "Prompt cannot be empty.")?;
        require_svg_output(&self.output_path)
    }

    pub fn effective_options(&self) -> EffectiveOptions {
        EffectiveOptions::resolve(self.quality, self.aspect_ratio, self.background)
    }

    pub fn into_params(self, image: ImageUpload) -> crate::models::EditParams {
        let options = self.effective_options();
        crate::models::EditParams {
            image,
            prompt: self.prompt,
            quality: options.quality,
            aspect_ratio: options.aspect_ratio,
            background: options.background,
            style: self.style,
        }
    }
}

impl ConvertInput {
    pub fn validate(&self) -> Result<(), SvgMakerError> {
        require_input_path(&self.input_path)?;
        require_svg_output(&self.output_path)
    }
}

fn require_non_empty(value: &str, message: &str) -> Result<(), SvgMakerError> {
    if value.trim().is_empty() {
        return Err(SvgMakerError::Validation(message.to_string()));
    }
    Ok(())
}

fn require_input_path(input_path: &str) -> Result<(), SvgMakerError> {
    require_non_empty(
        input_path,
        "Input path cannot be empty. Must be an absolute path to the image file.",
    )
}

fn require_svg_output(output_path: &str) -> Result<(), SvgMakerError> {
    require_non_empty(output_path, "Output path cannot be empty.")?;
    if !output_path.trim().to_ascii_lowercase().ends_with(".svg") {
        return Err(SvgMakerError::Validation(
            "Output path must end with .svg extension".to_string(),
        ));
    }
    Ok(())
}
