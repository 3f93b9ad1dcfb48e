//! MCP binding for the progress notifier.
//!
//! Wraps `Peer<RoleServer>` so a [`ProgressSession`] can push
//! `notifications/progress` messages to the client that issued the call.
//!
//! [`ProgressSession`]: crate::services::ProgressSession

use std::sync::Arc;

use async_trait::async_trait;
use rmcp::model::{ProgressNotificationParam, ProgressToken};
use rmcp::{Peer, RoleServer};

use crate::services::{ProgressError, ProgressNotifier, ProgressUpdate};

/// Sends progress notifications to the connected MCP client.
pub struct McpProgressNotifier {
    client: Peer<RoleServer>,
}

impl McpProgressNotifier {
    pub fn new(client: Peer<RoleServer>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProgressNotifier for McpProgressNotifier {
    async fn notify(&self, update: ProgressUpdate) -> Result<(), ProgressError> {
        self.client
            .notify_progress(ProgressNotificationParam {
                progress_token: update.token,
                progress: update.progress,
                total: Some(update.total),
                message: Some(update.message),
            })
            .await
            .map_err(|e| ProgressError::Delivery(e.to_string()))
    }
}

/// Progress token and notifier for one request.
///
/// The token comes from the request's `_meta`; without one the session is
/// silent and the notifier is never called.
pub fn make_mcp_notifier(
    meta: &rmcp::model::Meta,
    client: &Peer<RoleServer>,
) -> (Option<ProgressToken>, Arc<dyn ProgressNotifier>) {
    let token = meta.get_progress_token().map(|token| token.clone());
    let notifier: Arc<dyn ProgressNotifier> = Arc::new(McpProgressNotifier::new(client.clone()));
    (token, notifier)
}
