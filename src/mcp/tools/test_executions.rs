//! MCP tools for test executions and their steps.

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

use super::{json_result, list_query, request_body, text_result};
use crate::client::executor::ApiExecutor;
use crate::services::TestExecutionService;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestExecutionKeyParams {
    #[schemars(description = "ID or key of the test execution (e.g., PROJ-E1)")]
    pub test_execution_id_or_key: String,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTestExecutionsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_case_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_cycle_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
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
pub struct CreateTestExecutionParams {
    pub project_key: String,
    pub test_case_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_cycle_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "When the test was executed (ISO 8601 date-time)")]
    pub executed_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_issue_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_steps: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestExecutionParams {
    #[serde(skip_serializing)]
    pub test_execution_id_or_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_issue_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_steps: Option<Map<String, Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExecutionStepsParams {
    pub test_execution_id_or_key: String,
    #[schemars(description = "Step results payload, sent to the API as given")]
    pub test_steps: Map<String, Value>,
}

pub struct TestExecutionTools<E: ApiExecutor> {
    service: TestExecutionService<E>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<E: ApiExecutor + 'static> TestExecutionTools<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            service: TestExecutionService::new(executor),
            tool_router: Self::tool_router(),
        }
    }

    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    #[tool(description = "Get a specific test execution by its ID or key.")]
    pub async fn get_test_execution(
        &self,
        params: Parameters<TestExecutionKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let execution = self.service.get(&params.0.test_execution_id_or_key).await?;
        json_result(&execution)
    }

    #[tool(description = "List test executions with optional filtering.")]
    pub async fn list_test_executions(
        &self,
        params: Parameters<ListTestExecutionsParams>,
    ) -> Result<CallToolResult, McpError> {
        let executions = self.service.list(list_query(&params.0)?).await?;
        json_result(&executions)
    }

    #[tool(description = "Create a new test execution.")]
    pub async fn create_test_execution(
        &self,
        params: Parameters<CreateTestExecutionParams>,
    ) -> Result<CallToolResult, McpError> {
        let created = self.service.create(request_body(&params.0)?).await?;
        json_result(&created)
    }

    #[tool(description = "Update an existing test execution.")]
    pub async fn update_test_execution(
        &self,
        params: Parameters<UpdateTestExecutionParams>,
    ) -> Result<CallToolResult, McpError> {
        let body = request_body(&params.0)?;
        let updated = self
            .service
            .update(&params.0.test_execution_id_or_key, body)
            .await?;
        json_result(&updated)
    }

    #[tool(description = "Get all test steps for a test execution.")]
    pub async fn get_test_execution_test_steps(
        &self,
        params: Parameters<TestExecutionKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let steps = self
            .service
            .test_steps(&params.0.test_execution_id_or_key)
            .await?;
        json_result(&steps)
    }

    #[tool(description = "Update test steps for a test execution.")]
    pub async fn update_test_execution_test_steps(
        &self,
        params: Parameters<UpdateExecutionStepsParams>,
    ) -> Result<CallToolResult, McpError> {
        let Parameters(UpdateExecutionStepsParams {
            test_execution_id_or_key,
            test_steps,
        }) = params;
        self.service
            .update_test_steps(&test_execution_id_or_key, Value::Object(test_steps))
            .await?;
        Ok(text_result("Test execution steps updated successfully."))
    }
}
