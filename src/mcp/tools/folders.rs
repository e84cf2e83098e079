//! MCP tools for folders.

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
use crate::services::{FolderService, FolderType};

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FolderIdParams {
    #[schemars(description = "Numeric ID of the folder")]
    pub folder_id: u64,
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListFoldersParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,
    /// Sent separately as `folderType`.
    #[serde(rename = "type", skip_serializing)]
    pub folder_type: Option<FolderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_results: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_at: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateFolderParams {
    pub name: String,
    #[serde(rename(deserialize = "type", serialize = "folderType"))]
    pub folder_type: FolderType,
    pub project_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(description = "ID of the parent folder (omit for a root folder)")]
    pub parent_folder_id: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

pub struct FolderTools<E: ApiExecutor> {
    service: FolderService<E>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<E: ApiExecutor + 'static> FolderTools<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            service: FolderService::new(executor),
            tool_router: Self::tool_router(),
        }
    }

    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    #[tool(description = "Get a specific folder by its ID.")]
    pub async fn get_folder(
        &self,
        params: Parameters<FolderIdParams>,
    ) -> Result<CallToolResult, McpError> {
        let folder = self.service.get(params.0.folder_id).await?;
        json_result(&folder)
    }

    #[tool(description = "List folders with optional filtering by project and type.")]
    pub async fn list_folders(
        &self,
        params: Parameters<ListFoldersParams>,
    ) -> Result<CallToolResult, McpError> {
        let folders = self
            .service
            .list(params.0.folder_type, list_query(&params.0)?)
            .await?;
        json_result(&folders)
    }

    #[tool(description = "Create a new folder.")]
    pub async fn create_folder(
        &self,
        params: Parameters<CreateFolderParams>,
    ) -> Result<CallToolResult, McpError> {
        let created = self.service.create(request_body(&params.0)?).await?;
        json_result(&created)
    }
}
