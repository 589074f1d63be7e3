//! JSON-RPC 2.0 message types for the stdio transport.
//!
//! Frames are line-delimited: one request or response object per line.
//! Requests without an `id` are notifications and never receive a response.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Protocol revision reported during the `initialize` handshake.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

pub const JSONRPC_VERSION: &str = "2.0";

pub const PARSE_ERROR: i32 = -32700;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;

/// An incoming request or notification.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// Absent for notifications.
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// An outgoing response, carrying either `result` or `error`.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
}

impl JsonRpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn failure(id: Value, code: i32, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            id,
            result: None,
            error: Some(JsonRpcError {
                code,
                message: message.into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_with_id_is_not_notification() {
        let request: JsonRpcRequest =
            serde_json::from_value(json!({ "jsonrpc": "2.0", "id": 1, "method": "ping" }))
                .unwrap();

        assert!(!request.is_notification());
        assert_eq!(request.method, "ping");
        assert!(request.params.is_null());
    }

    #[test]
    fn test_request_without_id_is_notification() {
        let request: JsonRpcRequest = serde_json::from_value(
            json!({ "jsonrpc": "2.0", "method": "notifications/initialized" }),
        )
        .unwrap();

        assert!(request.is_notification());
    }

    #[test]
    fn test_success_response_skips_error_field() {
        let response = JsonRpcResponse::success(json!(7), json!({ "ok": true }));
        let serialized = serde_json::to_value(&response).unwrap();

        assert_eq!(serialized["jsonrpc"], "2.0");
        assert_eq!(serialized["id"], 7);
        assert_eq!(serialized["result"]["ok"], true);
        assert!(serialized.get("error").is_none());
    }

    #[test]
    fn test_failure_response_skips_result_field() {
        let response = JsonRpcResponse::failure(Value::Null, METHOD_NOT_FOUND, "no such method");
        let serialized = serde_json::to_value(&response).unwrap();

        assert_eq!(serialized["error"]["code"], -32601);
        assert_eq!(serialized["error"]["message"], "no such method");
        assert!(serialized.get("result").is_none());
    }
}
