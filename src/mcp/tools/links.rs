//! MCP tool for removing links.

use rmcp::{
    ErrorData as McpError,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::text_result;
use crate::client::executor::ApiExecutor;
use crate::services::LinkService;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteLinkParams {
    #[schemars(description = "Numeric ID of the link")]
    pub link_id: u64,
}

pub struct LinkTools<E: ApiExecutor> {
    service: LinkService<E>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<E: ApiExecutor + 'static> LinkTools<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            service: LinkService::new(executor),
            tool_router: Self::tool_router(),
        }
    }

    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    #[tool(description = "Delete a link by its ID.")]
    pub async fn delete_link(
        &self,
        params: Parameters<DeleteLinkParams>,
    ) -> Result<CallToolResult, McpError> {
        self.service.delete(params.0.link_id).await?;
        Ok(text_result("Link deleted successfully."))
    }
}
