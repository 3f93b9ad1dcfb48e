use rmcp::model::{CallToolResult, Content, IntoContents};

use super::types::Operation;
use crate::SvgMakerError;

/// A failed tool invocation, rendered as an error envelope.
///
/// Failures never surface as protocol errors: the client always gets a
/// result with `is_error` set and a single text block of the form
/// `"<operation prefix>: <message>"`.
#[derive(Debug)]
pub struct ToolFailure {
    pub operation: Operation,
    pub error: SvgMakerError,
}

impl ToolFailure {
    pub fn new(operation: Operation, error: impl Into<SvgMakerError>) -> Self {
        Self {
            operation,
            error: error.into(),
        }
    }

    pub fn message(&self) -> String {
        format!("{}: {}", self.operation.error_prefix(), self.error)
    }

    pub fn into_result(self) -> CallToolResult {
        CallToolResult::error(self.into_contents())
    }
}

impl IntoContents for ToolFailure {
    fn into_contents(self) -> Vec<Content> {
        vec![Content::text(self.message())]
    }
}
