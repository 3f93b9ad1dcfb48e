use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use rmcp::{
    model::*, service::RequestContext, ErrorData as McpError, RoleServer, ServerHandler,
    ServiceExt,
};
use schemars::JsonSchema;

use crate::init::AppContext;
use crate::mcp::error::ToolFailure;
use crate::mcp::progress::make_mcp_notifier;
use crate::mcp::types::{ConvertInput, EditInput, GenerateInput, Operation};
use crate::services::{
    ProgressConfig, ProgressNotifier, ProgressSession, SvgMakerService, DEFAULT_TICK_INTERVAL,
};
use crate::utils::paths::PathResolver;
use crate::SvgMakerError;

/// MCP server exposing the SVGMaker operations as tools.
#[derive(Clone)]
pub struct SvgMakerServer {
    pub(crate) service: Arc<SvgMakerService>,
    pub(crate) resolver: Arc<PathResolver>,
    pub(crate) tick_interval: Duration,
}

impl SvgMakerServer {
    pub fn new(service: Arc<SvgMakerService>, resolver: Arc<PathResolver>) -> Self {
        Self {
            service,
            resolver,
            tick_interval: DEFAULT_TICK_INTERVAL,
        }
    }

    /// Create server from shared AppContext.
    pub fn from_context(ctx: &AppContext) -> Self {
        Self {
            service: ctx.service.clone(),
            resolver: ctx.resolver.clone(),
            tick_interval: ctx.config.progress_interval,
        }
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    /// Tool descriptors advertised by `tools/list`.
    pub fn tools() -> Vec<Tool> {
        vec![
            Tool::new(
                Operation::Generate.tool_name(),
                "Generates an SVG image from a text prompt using SVGMaker API and saves it to a specified local path.",
                schema_for::<GenerateInput>(),
            ),
            Tool::new(
                Operation::Edit.tool_name(),
                "Edits an existing image or SVG file based on a text prompt using SVGMaker API and saves the result to a specified local path.",
                schema_for::<EditInput>(),
            ),
            Tool::new(
                Operation::Convert.tool_name(),
                "Converts an image file to SVG format using SVGMaker API and saves it to a specified local path.",
                schema_for::<ConvertInput>(),
            ),
        ]
    }

    /// Run one tool call to completion.
    ///
    /// Unknown tool names are protocol errors. Everything else, including
    /// malformed arguments, becomes a result envelope. The progress session
    /// is always cleaned up before the envelope is returned.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
        token: Option<ProgressToken>,
        notifier: Arc<dyn ProgressNotifier>,
    ) -> Result<CallToolResult, McpError> {
        let operation = Operation::from_tool_name(name).ok_or_else(|| {
            McpError::invalid_params(format!("Unknown tool: {}", name), None)
        })?;

        let config =
            ProgressConfig::new(operation.phase_messages()).with_tick_interval(self.tick_interval);
        let mut session = ProgressSession::new(token, notifier, config);

        let outcome = self.run_operation(operation, arguments, &mut session).await;
        session.cleanup().await;

        Ok(match outcome {
            Ok(output) => {
                tracing::info!(tool = name, output = %output.display(), "Tool call succeeded");
                CallToolResult::success(vec![Content::text(operation.success_message(&output))])
            }
            Err(error) => {
                let failure = ToolFailure::new(operation, error);
                tracing::warn!(tool = name, "{}", failure.message());
                failure.into_result()
            }
        })
    }

    async fn run_operation(
        &self,
        operation: Operation,
        arguments: Option<JsonObject>,
        session: &mut ProgressSession,
    ) -> Result<PathBuf, SvgMakerError> {
        let arguments = arguments
            .ok_or_else(|| SvgMakerError::Validation("No arguments provided".to_string()))?;
        let value = serde_json::Value::Object(arguments);

        match operation {
            Operation::Generate => {
                let input: GenerateInput = serde_json::from_value(value)?;
                self.handle_generate(input, session).await
            }
            Operation::Edit => {
                let input: EditInput = serde_json::from_value(value)?;
                self.handle_edit(input, session).await
            }
            Operation::Convert => {
                let input: ConvertInput = serde_json::from_value(value)?;
                self.handle_convert(input, session).await
            }
        }
    }
}

fn schema_for<T: JsonSchema>() -> Arc<JsonObject> {
    let schema = schemars::schema_for!(T);
    match serde_json::to_value(&schema) {
        Ok(serde_json::Value::Object(map)) => Arc::new(map),
        _ => Arc::new(JsonObject::new()),
    }
}

impl ServerHandler for SvgMakerServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "svgmaker-mcp".to_string(),
                title: Some("SVGMaker".to_string()),
                version: env!("CARGO_PKG_VERSION").to_string(),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Generate, edit and convert SVG images with the SVGMaker API.\n\n\
                 - svgmaker_generate: create an SVG from a text prompt\n\
                 - svgmaker_edit: modify an existing image or SVG with a text instruction\n\
                 - svgmaker_convert: vectorize a raster image\n\n\
                 All tools write the result to output_path, which must end with .svg. \
                 Long-running calls report progress when a progress token is supplied."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(Self::tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let (token, notifier) = make_mcp_notifier(&context.meta, &context.peer);
        self.dispatch(&request.name, request.arguments, token, notifier)
            .await
    }
}

/// Run MCP server on stdio transport.
pub async fn run_mcp_server(ctx: AppContext) -> anyhow::Result<()> {
    let server = SvgMakerServer::from_context(&ctx);

    tracing::info!("Starting SVGMaker MCP server v{}", env!("CARGO_PKG_VERSION"));

    // Stdio transport
    let transport = (tokio::io::stdin(), tokio::io::stdout());
    let service = server.serve(transport).await?;
    tracing::info!(
        "MCP server listening on stdio ({} tools)",
        Operation::ALL.len()
    );

    // Graceful shutdown
    let cancel = service.cancellation_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received");
            cancel.cancel();
        }
    });

    let reason = service.waiting().await?;
    tracing::info!(?reason, "MCP server shutting down");

    Ok(())
}
