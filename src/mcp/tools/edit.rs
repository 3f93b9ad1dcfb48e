use std::path::PathBuf;

use tracing::instrument;

use super::{report, with_processing};
use crate::mcp::types::EditInput;
use crate::mcp::SvgMakerServer;
use crate::models::ImageUpload;
use crate::services::ProgressSession;
use crate::utils::files::{read_file_to_bytes, write_text_file};
use crate::utils::paths::AccessKind;
use crate::SvgMakerError;

impl SvgMakerServer {
    /// Edit an existing image or SVG with a text instruction.
    ///
    /// The input must resolve and be readable before anything is sent to the
    /// API, so a missing input never costs a remote call.
    #[instrument(skip_all, fields(input = %input.input_path, output = %input.output_path))]
    pub async fn handle_edit(
        &self,
        input: EditInput,
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
        let params = input.into_params(ImageUpload::from_path(&source, bytes));
        tracing::debug!(
            bytes = params.image.bytes.len(),
            mime = params.image.mime_type,
            "Editing SVG"
        );
        let svg = with_processing(session, self.service.edit(params)).await?;

        write_text_file(&output, &svg).await?;
        report(session.send_final().await);
        Ok(output)
    }
}
