//! MCP server integration for raindrop-mcp.
//!
//! - Exposes the tool registry (`create-bookmark`, `search-bookmarks`,
//!   `list-collections`) through rmcp's `ServerHandler`
//! - Tool results are a single text content item; every failure is returned
//!   as a JSON-RPC error, never as a successful result carrying error text
//!
//! Transports (stdio, streamable HTTP) live in `infra::runtime::mcp_transport`.

use std::sync::Arc;

use rmcp::{
    model::{
        CallToolRequestParam, CallToolResult, Content, Implementation, JsonObject,
        ListToolsResult, PaginatedRequestParam, ProtocolVersion, ServerCapabilities, ServerInfo,
        Tool as McpTool,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer, ServerHandler,
};

use crate::clients::raindrop::RaindropRemote;
use crate::core::error::RaindropError;
use crate::infra::config::RaindropConfig;
use crate::tools::registry::{build_registry, ToolRegistry};

/// The MCP server handler. Holds the registry and nothing mutable.
#[derive(Clone)]
pub struct RaindropSvc {
    registry: ToolRegistry,
}

impl RaindropSvc {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn from_config(cfg: &RaindropConfig) -> Result<Self, RaindropError> {
        let client = RaindropRemote::from_config(cfg)?;
        Ok(Self::new(build_registry(client)))
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Tool descriptors as advertised by `tools/list`.
    pub fn tools(&self) -> Vec<McpTool> {
        self.registry
            .list()
            .into_iter()
            .map(|meta| {
                let schema = match meta.input_schema {
                    serde_json::Value::Object(obj) => obj,
                    _ => JsonObject::new(),
                };
                McpTool::new(meta.name, meta.description, Arc::new(schema))
            })
            .collect()
    }

    /// Run one tool by name. Shared by `call_tool` and the CLI.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        tracing::debug!(tool = name, "tools/call invoked");
        let arguments = arguments.unwrap_or_default();
        match self.registry.call(name, &arguments).await {
            Ok(text) => {
                tracing::trace!(tool = name, text = %text, "tools/call returning text");
                Ok(CallToolResult::success(vec![Content::text(text)]))
            }
            Err(e) => {
                tracing::warn!(tool = name, error = %e, "tools/call failed");
                Err(e.into_mcp())
            }
        }
    }
}

impl ServerHandler for RaindropSvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "raindrop-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Implementation::from_build_env()
            },
            instructions: Some(
                "Manage Raindrop.io bookmarks: create-bookmark saves a URL, \
                 search-bookmarks finds saved bookmarks, list-collections shows collections."
                    .to_string(),
            ),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult {
            tools: self.tools(),
            next_cursor: None,
        })
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(&request.name, request.arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn svc_for(base: impl Into<String>, token: Option<&str>) -> RaindropSvc {
        let client = RaindropRemote::new(base, token.map(str::to_owned));
        RaindropSvc::new(build_registry(client))
    }

    fn text_of(result: &CallToolResult) -> String {
        let v = serde_json::to_value(result).unwrap();
        v["content"][0]["text"].as_str().unwrap().to_owned()
    }

    #[test]
    fn advertises_tools_capability_and_name() {
        let info = svc_for("http://localhost:0", None).get_info();
        assert_eq!(info.server_info.name, "raindrop-mcp");
        assert_eq!(info.server_info.version, env!("CARGO_PKG_VERSION"));
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn lists_three_tools_with_object_schemas() {
        let tools = svc_for("http://localhost:0", None).tools();
        assert_eq!(tools.len(), 3);
        let search = tools.iter().find(|t| t.name == "search-bookmarks").unwrap();
        assert_eq!(search.input_schema["required"], json!(["query"]));
        assert_eq!(search.input_schema["properties"]["perpage"]["maximum"], 50);
    }

    #[tokio::test]
    async fn success_is_a_single_text_item() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/raindrops/0");
            then.status(200).json_body(json!({"items": [], "count": 0}));
        });
        let svc = svc_for(server.base_url(), Some("t"));
        let mut args = JsonObject::new();
        args.insert("query".into(), json!("nothing"));
        let result = svc.dispatch("search-bookmarks", Some(args)).await.unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(text_of(&result), "No bookmarks found matching your search.");
    }

    #[tokio::test]
    async fn validation_failure_is_invalid_params() {
        let svc = svc_for("http://localhost:0", Some("t"));
        let err = svc.dispatch("create-bookmark", None).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert_eq!(err.message, "Invalid arguments: url: Required");
    }

    #[tokio::test]
    async fn unknown_tool_is_invalid_params() {
        let svc = svc_for("http://localhost:0", Some("t"));
        let err = svc.dispatch("delete-bookmark", None).await.unwrap_err();
        assert_eq!(err.code.0, -32602);
        assert_eq!(err.message, "Unknown tool: delete-bookmark");
    }

    #[tokio::test]
    async fn missing_token_is_internal_error() {
        let svc = svc_for("http://localhost:0", None);
        let err = svc.dispatch("list-collections", None).await.unwrap_err();
        assert_eq!(err.code.0, -32603);
        assert_eq!(err.message, "RAINDROP_TOKEN is not set");
    }
}
