//! Model Context Protocol method handling over JSON-RPC 2.0

use super::tools::{call_tool, tool_definitions};
use super::ToolServer;
use serde::Deserialize;
use serde_json::{json, Value};
use solidforge_communication::protocol::{
    parse_request, JsonRpcError, JsonRpcRequest, JsonRpcResponse, INTERNAL_ERROR,
};
use tracing::{debug, warn};

pub const PROTOCOL_VERSION: &str = "2024-11-05";
pub const SERVER_NAME: &str = "solidforge";
pub const WORKSPACE_RESOURCE_URI: &str = "workspace://current";

#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Deserialize)]
struct ResourceReadParams {
    uri: String,
}

type MethodResult = std::result::Result<Value, JsonRpcError>;

impl ToolServer {
    /// Handle one line of input, returning the line to write back, if any.
    pub fn handle_line(&self, line: &str) -> Option<String> {
        let response = match parse_request(line) {
            Ok(request) => self.handle_request(request)?,
            Err(response) => {
                warn!("Rejected request: {:?}", response.error);
                response
            }
        };

        match serde_json::to_string(&response) {
            Ok(text) => Some(text),
            Err(e) => {
                let fallback = JsonRpcResponse::failure(
                    response.id,
                    JsonRpcError::new(INTERNAL_ERROR, format!("Internal error: {}", e)),
                );
                serde_json::to_string(&fallback).ok()
            }
        }
    }

    /// Dispatch a decoded request. Notifications produce no response.
    pub fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        debug!("Request: method={} id={:?}", request.method, request.id);
        let params = request.params.unwrap_or(Value::Null);

        let result = match request.method.as_str() {
            "initialize" => Ok(initialize_result()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => self.tools_call(params),
            "resources/list" => Ok(resources_list()),
            "resources/read" => self.resources_read(params),
            method if method.starts_with("notifications/") => Ok(Value::Null),
            method => Err(JsonRpcError::method_not_found(method)),
        };

        let id = request.id?;
        Some(match result {
            Ok(value) => JsonRpcResponse::success(id, value),
            Err(error) => JsonRpcResponse::failure(id, error),
        })
    }

    fn tools_call(&self, params: Value) -> MethodResult {
        let params: ToolCallParams =
            serde_json::from_value(params).map_err(|e| JsonRpcError::invalid_params(e))?;

        let response = self.with_state(|state| call_tool(state, &params.name, params.arguments));
        if response.is_error() {
            warn!("Tool '{}' failed: {}", params.name, response.message);
        }

        let text = serde_json::to_string_pretty(&response)
            .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, e.to_string()))?;
        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "isError": response.is_error(),
        }))
    }

    fn resources_read(&self, params: Value) -> MethodResult {
        let params: ResourceReadParams =
            serde_json::from_value(params).map_err(|e| JsonRpcError::invalid_params(e))?;
        if params.uri != WORKSPACE_RESOURCE_URI {
            return Err(JsonRpcError::invalid_params(format!(
                "unknown resource '{}'",
                params.uri
            )));
        }

        Ok(json!({
            "contents": [{
                "uri": WORKSPACE_RESOURCE_URI,
                "mimeType": "application/json",
                "text": self.workspace_resource(),
            }]
        }))
    }
}

fn initialize_result() -> Value {
    json!({
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": {
            "tools": { "listChanged": false },
            "resources": { "listChanged": false },
        },
        "serverInfo": {
            "name": SERVER_NAME,
            "version": crate::VERSION,
        },
    })
}

fn resources_list() -> Value {
    json!({
        "resources": [{
            "uri": WORKSPACE_RESOURCE_URI,
            "name": "Current workspace",
            "description": "Information about the active workspace",
            "mimeType": "application/json",
        }]
    })
}
