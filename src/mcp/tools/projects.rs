//! MCP tools for projects.

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

use super::{json_result, list_query};
use crate::client::executor::ApiExecutor;
use crate::services::ProjectService;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectKeyParams {
    #[schemars(description = "ID or key of the project (e.g., PROJ)")]
    pub project_id_or_key: String,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListProjectsParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub struct ProjectTools<E: ApiExecutor> {
    service: ProjectService<E>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<E: ApiExecutor + 'static> ProjectTools<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            service: ProjectService::new(executor),
            tool_router: Self::tool_router(),
        }
    }

    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    #[tool(description = "Get a specific project by its ID or key.")]
    pub async fn get_project(
        &self,
        params: Parameters<ProjectKeyParams>,
    ) -> Result<CallToolResult, McpError> {
        let project = self.service.get(&params.0.project_id_or_key).await?;
        json_result(&project)
    }

    #[tool(description = "List projects.")]
    pub async fn list_projects(
        &self,
        params: Parameters<ListProjectsParams>,
    ) -> Result<CallToolResult, McpError> {
        let projects = self.service.list(list_query(&params.0)?).await?;
        json_result(&projects)
    }
}
