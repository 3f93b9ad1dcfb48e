//! File reads and writes for tool inputs and outputs.

use std::path::Path;

use crate::SvgMakerError;

/// Read an input image into memory.
pub async fn read_file_to_bytes(path: &Path) -> Result<Vec<u8>, SvgMakerError> {
    tokio::fs::read(path)
        .await
        .map_err(|source| SvgMakerError::ReadFile {
            path: path.to_path_buf(),
            source,
        })
}

/// Write SVG markup to `path` exactly as received.
pub async fn write_text_file(path: &Path, content: &str) -> Result<(), SvgMakerError> {
    tokio::fs::write(path, content.as_bytes())
        .await
        .map_err(|source| SvgMakerError::WriteFile {
            path: path.to_path_buf(),
            source,
        })
}
