//! Handler integration tests for MCP tool handlers.
//!
//! Tests drive `SvgMakerServer::dispatch` against a scripted API and check
//! the envelope, the written file, and the progress notifications.

pub mod convert_handler;
pub mod edit_handler;
pub mod generate_handler;
