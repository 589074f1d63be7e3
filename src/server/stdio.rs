//! Line-delimited JSON-RPC server over stdin/stdout.
//!
//! Stdout carries protocol frames only; all diagnostics go to stderr via
//! `tracing`. Tool failures are reported as successful responses with
//! `isError: true` so clients can show the failure text; JSON-RPC error
//! codes are reserved for protocol-level problems.

use anyhow::Result;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

use crate::tools::ToolRegistry;

use super::protocol::{
    JsonRpcRequest, JsonRpcResponse, INVALID_PARAMS, METHOD_NOT_FOUND, PARSE_ERROR,
    PROTOCOL_VERSION,
};

pub struct StdioServer {
    registry: Arc<ToolRegistry>,
}

impl StdioServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// Serves requests until stdin closes.
    pub async fn run(&self) -> Result<()> {
        let stdin = tokio::io::stdin();
        let mut lines = BufReader::new(stdin).lines();
        let mut stdout = tokio::io::stdout();

        info!(tools = self.registry.len(), "listening on stdio");

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(line).await {
                let serialized = serde_json::to_string(&response)?;
                stdout.write_all(serialized.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            }
        }

        info!("stdin closed, shutting down");
        Ok(())
    }

    /// Parses one frame and dispatches it. `None` means no response is due
    /// (the line was a notification).
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "malformed request line");
                return Some(JsonRpcResponse::failure(
                    Value::Null,
                    PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };
        self.handle_request(request).await
    }

    pub async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            match request.method.as_str() {
                "notifications/initialized" => debug!("client completed initialization"),
                other => debug!(method = other, "ignoring notification"),
            }
            return None;
        }
        let id = request.id.unwrap_or(Value::Null);

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(id, self.initialize_result()),
            "ping" => JsonRpcResponse::success(id, json!({})),
            "tools/list" => JsonRpcResponse::success(id, self.list_tools()),
            "tools/call" => self.call_tool(id, &request.params).await,
            other => JsonRpcResponse::failure(
                id,
                METHOD_NOT_FOUND,
                format!("Method not found: {}", other),
            ),
        };
        Some(response)
    }

    fn initialize_result(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {}
            },
            "serverInfo": {
                "name": crate::NAME,
                "version": crate::VERSION
            }
        })
    }

    fn list_tools(&self) -> Value {
        let tools: Vec<Value> = self
            .registry
            .tools()
            .iter()
            .map(|tool| {
                json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "inputSchema": tool.schema(),
                })
            })
            .collect();
        json!({ "tools": tools })
    }

    async fn call_tool(&self, id: Value, params: &Value) -> JsonRpcResponse {
        let name = match params["name"].as_str() {
            Some(name) => name,
            None => {
                return JsonRpcResponse::failure(
                    id,
                    INVALID_PARAMS,
                    "Missing required parameter: name",
                );
            }
        };
        let tool = match self.registry.get_tool(name) {
            Some(tool) => tool,
            None => {
                return JsonRpcResponse::failure(
                    id,
                    METHOD_NOT_FOUND,
                    format!("Unknown tool: {}", name),
                );
            }
        };

        let arguments = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
        if let Some(missing) = missing_required_argument(&tool.schema(), &arguments) {
            return JsonRpcResponse::failure(
                id,
                INVALID_PARAMS,
                format!("Missing required parameter: {}", missing),
            );
        }

        debug!(tool = name, "dispatching tool call");
        match tool.execute(arguments).await {
            Ok(text) => JsonRpcResponse::success(id, tool_result(text, false)),
            Err(e) => {
                error!(tool = name, error = %e, "tool execution failed");
                JsonRpcResponse::success(id, tool_result(format!("❌ {}", e), true))
            }
        }
    }
}

fn tool_result(text: String, is_error: bool) -> Value {
    json!({
        "content": [
            { "type": "text", "text": text }
        ],
        "isError": is_error,
    })
}

fn missing_required_argument(schema: &Value, arguments: &Value) -> Option<String> {
    schema["required"].as_array().and_then(|required| {
        required
            .iter()
            .filter_map(|key| key.as_str())
            .find(|key| arguments.get(key).is_none())
            .map(String::from)
    })
}
