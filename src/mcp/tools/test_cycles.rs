//! MCP tools for test cycles.

use rmcp::{
    ErrorData as McpError,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::Arc;

use super::{json_result, list_query, request_body};
use crate::client::executor::ApiExecutor;
use crate::services::TestCycleService;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestCycleKeyParams {
    #[schemars(description = "ID or key of the test cycle (e.g., PROJ-R1)")]
    pub test_cycle_id_or_key: String,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTestCyclesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_issue_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestCycleParams {
    pub name: String,
    pub project_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Jira account ID of the owner")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Planned start (ISO 8601 date-time)")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Planned end (ISO 8601 date-time)")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_issue_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestCycleParams {
    #[serde(skip_serializing)]
    pub test_cycle_id_or_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_issue_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub struct TestCycleTools<E: ApiExecutor> {
    service: TestCycleService<E>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<E: ApiExecutor + 'static> TestCycleTools<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            service: TestCycleService::new(executor),
            tool_router: Self::tool_router(),
        }
    }

    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    #[tool(description = "Get a specific test cycle by its ID or key.")]
    pub async fn get_test_cycle(
        &self,
        params: Parameters<TestCycleKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let cycle = self.service.get(&params.0.test_cycle_id_or_key).await?;
        json_result(&cycle)
    }

    #[tool(description = "List test cycles with optional filtering.")]
    pub async fn list_test_cycles(
        &self,
        params: Parameters<ListTestCyclesParams>,
    ) -> Result<CallToolResult, McpError> {
        let cycles = self.service.list(list_query(&params.0)?).await?;
        json_result(&cycles)
    }

    #[tool(description = "Create a new test cycle.")]
    pub async fn create_test_cycle(
        &self,
        params: Parameters<CreateTestCycleParams>,
    ) -> Result<CallToolResult, McpError> {
        let created = self.service.create(request_body(&params.0)?).await?;
        json_result(&created)
    }

    #[tool(description = "Update an existing test cycle.")]
    pub async fn update_test_cycle(
        &self,
        params: Parameters<UpdateTestCycleParams>,
    ) -> Result<CallToolResult, McpError> {
        let body = request_body(&params.0)?;
        let updated = self
            .service
            .update(&params.0.test_cycle_id_or_key, body)
            .await?;
        json_result(&updated)
    }
}
