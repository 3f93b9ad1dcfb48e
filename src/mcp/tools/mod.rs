//! Tool handlers for the three SVGMaker operations.
//!
//! Each handler validates its input, resolves paths, and drives a
//! [`ProgressSession`] through its phases around the remote call. The
//! session is owned by the dispatcher, which always runs cleanup afterwards.

pub mod convert;
pub mod edit;
pub mod generate;

use std::future::Future;

use crate::services::{ApiError, ProgressError, ProgressSession};
use crate::SvgMakerError;

/// Log a failed notification. Delivery never fails the tool call.
pub(crate) fn report(result: Result<(), ProgressError>) {
    if let Err(e) = result {
        tracing::warn!(error = %e, "Progress notification failed");
    }
}

/// Run the remote call inside the processing phase.
///
/// On success the session moves to saving, which stops the ticker first. On
/// failure the ticker is stopped and no saving or complete notification is
/// sent.
pub(crate) async fn with_processing<F>(
    session: &mut ProgressSession,
    call: F,
) -> Result<String, SvgMakerError>
where
    F: Future<Output = Result<String, ApiError>>,
{
    report(session.start_processing().await);
    match call.await {
        Ok(svg) => {
            report(session.send_saving().await);
            Ok(svg)
        }
        Err(e) => {
            session.stop_processing().await;
            tracing::warn!(error = %e, "SVGMaker request failed");
            Err(e.into())
        }
    }
}
