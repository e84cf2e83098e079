//! MCP tools for reference data: statuses, priorities and environments.

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
use crate::services::{EnvironmentService, PriorityService, StatusService, StatusType};

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListStatusesParams {
    /// Sent separately as `statusType`.
    #[serde(rename = "type", skip_serializing)]
    pub status_type: Option<StatusType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Filters shared by the priority and environment listings.
#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectScopedListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub struct ReferenceTools<E: ApiExecutor> {
    statuses: StatusService<E>,
    priorities: PriorityService<E>,
    environments: EnvironmentService<E>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<E: ApiExecutor + 'static> ReferenceTools<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            statuses: StatusService::new(Arc::clone(&executor)),
            priorities: PriorityService::new(Arc::clone(&executor)),
            environments: EnvironmentService::new(executor),
            tool_router: Self::tool_router(),
        }
    }

    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    #[tool(description = "List statuses with optional filtering by type and project.")]
    pub async fn list_statuses(
        &self,
        params: Parameters<ListStatusesParams>,
    ) -> Result<CallToolResult, McpError> {
        let statuses = self
            .statuses
            .list(params.0.status_type, list_query(&params.0)?)
            .await?;
        json_result(&statuses)
    }

    #[tool(description = "List priorities.")]
    pub async fn list_priorities(
        &self,
        params: Parameters<ProjectScopedListParams>,
    ) -> Result<CallToolResult, McpError> {
        let priorities = self.priorities.list(list_query(&params.0)?).await?;
        json_result(&priorities)
    }

    #[tool(description = "List environments.")]
    pub async fn list_environments(
        &self,
        params: Parameters<ProjectScopedListParams>,
    ) -> Result<CallToolResult, McpError> {
        let environments = self.environments.list(list_query(&params.0)?).await?;
        json_result(&environments)
    }
}
