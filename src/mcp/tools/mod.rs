//! MCP tool implementations
//!
//! Tool handlers are organized by Zephyr resource. Each struct owns the
//! service it drives and its own `ToolRouter`, which supplies the tool's
//! name, description and input schema for the catalog.

mod folders;
mod links;
mod projects;
mod reference;
mod test_cases;
mod test_cycles;
mod test_executions;

#[cfg(test)]
mod test_cases_test;

pub use folders::{CreateFolderParams, FolderIdParams, FolderTools, ListFoldersParams};
pub use links::{DeleteLinkParams, LinkTools};
pub use projects::{ListProjectsParams, ProjectKeyParams, ProjectTools};
pub use reference::{ListStatusesParams, ProjectScopedListParams, ReferenceTools};
pub use test_cases::{
    CreateTestCaseParams, IssueLinkParams, ListTestCasesParams, ScriptType, TestCaseKeyParams,
    TestCaseTools, TestScriptParams, TestStepsParams, UpdateTestCaseParams, WebLinkParams,
};
pub use test_cycles::{
    CreateTestCycleParams, ListTestCyclesParams, TestCycleKeyParams, TestCycleTools,
    UpdateTestCycleParams,
};
pub use test_executions::{
    CreateTestExecutionParams, ListTestExecutionsParams, TestExecutionKeyParams,
    TestExecutionTools, UpdateExecutionStepsParams, UpdateTestExecutionParams,
};

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use serde_json::Value;

use crate::client::error::ZephyrError;
use crate::services::QueryParams;

/// Wrap a value as pretty-printed JSON text content.
pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| ZephyrError::internal(format!("Failed to serialize tool result: {e}")))?;
    Ok(CallToolResult::success(vec![Content::text(text)]))
}

pub(crate) fn text_result(message: &str) -> CallToolResult {
    CallToolResult::success(vec![Content::text(message)])
}

/// Serialize tool parameters into a request body.
///
/// Fields marked `skip_serializing` (path identifiers) stay out of the body.
pub(crate) fn request_body<T: Serialize>(params: &T) -> Result<Value, ZephyrError> {
    serde_json::to_value(params)
        .map_err(|e| ZephyrError::internal(format!("Failed to build request body: {e}")))
}

/// Serialize tool parameters into list query parameters.
pub(crate) fn list_query<T: Serialize>(params: &T) -> Result<QueryParams, ZephyrError> {
    match request_body(params)? {
        Value::Object(fields) => Ok(QueryParams::new().extend_scalars(&fields)),
        _ => Ok(QueryParams::new()),
    }
}
