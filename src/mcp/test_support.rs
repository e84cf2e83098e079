//! Helpers shared by the MCP tests.

use rmcp::model::{CallToolResult, JsonObject, RawContent};
use serde_json::Value;

pub(crate) fn result_text(result: &CallToolResult) -> &str {
    assert_eq!(result.content.len(), 1);
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    }
}

pub(crate) fn result_json(result: &CallToolResult) -> Value {
    serde_json::from_str(result_text(result)).unwrap()
}

pub(crate) fn args(value: Value) -> Option<JsonObject> {
    match value {
        Value::Object(map) => Some(map),
        _ => panic!("arguments must be an object"),
    }
}
