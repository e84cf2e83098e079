//! MCP tools for test cases, their links, scripts and steps.

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
use tracing::warn;

use super::{json_result, list_query, request_body};
use crate::client::executor::ApiExecutor;
use crate::client::steps::{StepInput, StepsMode};
use crate::services::{TestCaseService, TestCaseUpdate};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseKeyParams {
    #[schemars(description = "The key of the test case (e.g., PROJ-T123)")]
    pub test_case_key: String,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListTestCasesParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Key of the project (e.g., PROJ)")]
    pub project_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Numeric ID of the folder")]
    pub folder_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Key of the linked Jira issue (e.g., PROJ-456)")]
    pub jira_issue_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Maximum number of results to return")]
    pub max_results: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Zero-based index of the first result")]
    pub start_at: Option<u64>,
    /// Further filters, forwarded as query parameters.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTestCaseParams {
    #[schemars(description = "Name of the test case")]
    pub name: String,
    #[schemars(description = "Key of the project")]
    pub project_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Jira account ID of the owner")]
    pub owner_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jira_issue_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_script: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_steps: Option<Map<String, Value>>,
    /// Additional fields, sent in the body as given.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTestCaseParams {
    #[schemars(description = "The key of the test case to update")]
    pub test_case_key: String,
    #[serde(flatten)]
    pub update: TestCaseUpdate,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueLinkParams {
    pub test_case_key: String,
    #[schemars(description = "Key of the Jira issue to link (e.g., PROJ-456)")]
    pub issue_key: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct WebLinkParams {
    pub test_case_key: String,
    pub url: String,
    #[schemars(description = "Link description (defaults to the URL)")]
    pub description: Option<String>,
}

/// Kind of test script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScriptType {
    StepByStep,
    Bdd,
    Plain,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestScriptParams {
    #[serde(skip_serializing)]
    pub test_case_key: String,
    #[serde(rename = "type")]
    pub script_type: ScriptType,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "Script text for PLAIN and BDD scripts")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<Value>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestStepsParams {
    pub test_case_key: String,
    #[schemars(
        description = "Array of test step objects in simple format: {description, testData?, expectedResult}"
    )]
    pub steps: Vec<StepInput>,
    #[serde(default)]
    #[schemars(description = "How the steps are combined with existing ones (default: OVERWRITE)")]
    pub mode: StepsMode,
}

pub struct TestCaseTools<E: ApiExecutor> {
    service: TestCaseService<E>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<E: ApiExecutor + 'static> TestCaseTools<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            service: TestCaseService::new(executor),
            tool_router: Self::tool_router(),
        }
    }

    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    #[tool(
        description = "Get a specific test case by its key. The response includes every test step under 'testSteps'."
    )]
    pub async fn get_test_case(
        &self,
        params: Parameters<TestCaseKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let key = params.0.test_case_key.as_str();
        let (case, steps) = tokio::try_join!(self.service.get(key), self.service.test_steps(key))?;

        let mut combined = match case {
            Value::Object(fields) => fields,
            other => {
                warn!(key, payload = %other, "Test case lookup returned no JSON object");
                Map::new()
            }
        };
        combined.remove("testScript");
        combined.insert("testSteps".into(), Value::Array(steps.values));

        json_result(&combined)
    }

    #[tool(description = "List test cases with optional filtering by project, folder, or Jira issue.")]
    pub async fn list_test_cases(
        &self,
        params: Parameters<ListTestCasesParams>,
    ) -> Result<CallToolResult, McpError> {
        let cases = self.service.list(list_query(&params.0)?).await?;
        json_result(&cases)
    }

    #[tool(description = "Create a new test case.")]
    pub async fn create_test_case(
        &self,
        params: Parameters<CreateTestCaseParams>,
    ) -> Result<CallToolResult, McpError> {
        let created = self.service.create(request_body(&params.0)?).await?;
        json_result(&created)
    }

    #[tool(
        description = "Update an existing test case. Only the provided fields change; the rest of the test case is kept."
    )]
    pub async fn update_test_case(
        &self,
        params: Parameters<UpdateTestCaseParams>,
    ) -> Result<CallToolResult, McpError> {
        let updated = self
            .service
            .update(&params.0.test_case_key, &params.0.update)
            .await?;
        json_result(&updated)
    }

    #[tool(description = "Get links associated with a test case.")]
    pub async fn get_test_case_links(
        &self,
        params: Parameters<TestCaseKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let links = self.service.links(&params.0.test_case_key).await?;
        json_result(&links)
    }

    #[tool(description = "Create an issue link for a test case.")]
    pub async fn create_test_case_issue_link(
        &self,
        params: Parameters<IssueLinkParams>,
    ) -> Result<CallToolResult, McpError> {
        let link = self
            .service
            .create_issue_link(&params.0.test_case_key, &params.0.issue_key)
            .await?;
        json_result(&link)
    }

    #[tool(description = "Create a web link for a test case.")]
    pub async fn create_test_case_web_link(
        &self,
        params: Parameters<WebLinkParams>,
    ) -> Result<CallToolResult, McpError> {
        let link = self
            .service
            .create_web_link(
                &params.0.test_case_key,
                &params.0.url,
                params.0.description.as_deref(),
            )
            .await?;
        json_result(&link)
    }

    #[tool(description = "Get the test script for a test case.")]
    pub async fn get_test_case_test_script(
        &self,
        params: Parameters<TestCaseKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let script = self.service.test_script(&params.0.test_case_key).await?;
        json_result(&script)
    }

    #[tool(description = "Create or update the test script for a test case.")]
    pub async fn create_test_case_test_script(
        &self,
        params: Parameters<TestScriptParams>,
    ) -> Result<CallToolResult, McpError> {
        let body = request_body(&params.0)?;
        let script = self
            .service
            .create_test_script(&params.0.test_case_key, body)
            .await?;
        json_result(&script)
    }

    #[tool(description = "Get all test steps for a test case.")]
    pub async fn get_test_case_test_steps(
        &self,
        params: Parameters<TestCaseKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let steps = self.service.test_steps(&params.0.test_case_key).await?;
        json_result(&steps)
    }

    #[tool(
        description = "Create or update test steps for a test case. Each step is a simple object with description, testData, and expectedResult properties (NOT wrapped in an 'inline' object)."
    )]
    pub async fn create_test_case_test_steps(
        &self,
        params: Parameters<TestStepsParams>,
    ) -> Result<CallToolResult, McpError> {
        let created = self
            .service
            .create_test_steps(&params.0.test_case_key, params.0.mode, &params.0.steps)
            .await?;
        json_result(&created)
    }

    #[tool(
        description = "Update test steps for a test case with the given mode. Each step is a simple object with description, testData, and expectedResult properties (NOT wrapped in an 'inline' object)."
    )]
    pub async fn update_test_case_test_steps(
        &self,
        params: Parameters<TestStepsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.create_test_case_test_steps(params).await
    }
}
