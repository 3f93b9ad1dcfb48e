use std::path::PathBuf;

use tracing::instrument;

use super::{report, with_processing};
use crate::mcp::types::ConvertInput;
use crate::mcp::SvgMakerServer;
use crate::models::{ConvertParams, ImageUpload};
use crate::services::ProgressSession;
use crate::utils::files::{read_file_to_bytes, write_text_file};
use crate::utils::paths::AccessKind;
use crate::SvgMakerError;

impl SvgMakerServer {
    /// Vectorize a raster image into an SVG.
    #[instrument(skip_all, fields(input = %input.input_path, output = %input.output_path))]
    pub async fn handle_convert(
        &self,
        input: ConvertInput,
        session: &mut ProgressSession,
    ) -> Result<PathBuf, SvgMakerError> {
        input.validate()?;
        let source = self
            .resolver
            .resolve(&input.input_path, AccessKind::Read)
            .await?;
        let output = self
            .resolver
            .resolve(&input.output_path, AccessKind::Write)
            .await?;

        report(session.send_initial().await);
        report(session.send_preparing().await);

        let bytes = read_file_to_bytes(&source).await?;
        let params = ConvertParams {
            file: ImageUpload::from_path(&source, bytes),
        };
        let svg = with_processing(session, self.service.convert(params)).await?;

        write_text_file(&output, &svg).await?;
        report(session.send_final().await);
        Ok(output)
    }
}
