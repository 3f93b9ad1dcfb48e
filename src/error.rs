use std::path::PathBuf;

use thiserror::Error;

use crate::services::svgmaker::ApiError;
use crate::utils::paths::PathError;

/// Error type for a single SVGMaker tool invocation.
///
/// Every variant ends up as the text of an MCP error envelope, so the
/// `Display` output is what the client sees after the operation prefix.
#[derive(Debug, Error)]
pub enum SvgMakerError {
    /// Tool arguments failed validation.
    #[error("{0}")]
    Validation(String),

    /// A path was disallowed or inaccessible.
    #[error(transparent)]
    Path(#[from] PathError),

    /// The remote call failed or produced no SVG.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The input image could not be read.
    #[error("Failed to read file: {}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The generated SVG could not be written.
    #[error("Failed to write file: {}", .path.display())]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<serde_json::Error> for SvgMakerError {
    fn from(err: serde_json::Error) -> Self {
        SvgMakerError::Validation(format!("Invalid arguments: {}", err))
    }
}
