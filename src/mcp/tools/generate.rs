use std::path::PathBuf;

use tracing::instrument;

use super::{report, with_processing};
use crate::mcp::types::GenerateInput;
use crate::mcp::SvgMakerServer;
use crate::services::ProgressSession;
use crate::utils::files::write_text_file;
use crate::utils::paths::AccessKind;
use crate::SvgMakerError;

impl SvgMakerServer {
    /// Generate an SVG from a text prompt and save it to `output_path`.
    #[instrument(skip_all, fields(output = %input.output_path))]
    pub async fn handle_generate(
        &self,
        input: GenerateInput,
        session: &mut ProgressSession,
    ) -> Result<PathBuf, SvgMakerError> {
        input.validate()?;
        let output = self
            .resolver
            .resolve(&input.output_path, AccessKind::Write)
            .await?;

        report(session.send_initial().await);
        report(session.send_preparing().await);

        let params = input.into_params();
        tracing::debug!(
            quality = ?params.quality,
            aspect_ratio = ?params.aspect_ratio,
            background = ?params.background,
            "Generating SVG"
        );
        let svg = with_processing(session, self.service.generate(params)).await?;

        write_text_file(&output, &svg).await?;
        report(session.send_final().await);
        Ok(output)
    }
}
