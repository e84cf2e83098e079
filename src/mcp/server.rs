//! MCP server implementation
//!
//! `ZephyrServer` coordinates the per-resource tool structs. It serves the
//! combined tool catalog and is the single boundary where tool arguments are
//! validated and failures are logged and converted for the host.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::wrapper::Parameters,
    model::{
        CallToolRequestParams, CallToolResult, Implementation, JsonObject, ListToolsResult,
        PaginatedRequestParams, ProtocolVersion, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::client::error::ZephyrError;
use crate::client::executor::ApiExecutor;

use super::tools::{
    FolderTools, LinkTools, ProjectTools, ReferenceTools, TestCaseTools, TestCycleTools,
    TestExecutionTools,
};

const INSTRUCTIONS: &str = "Zephyr Scale MCP Server - Manage test cases, test cycles, test \
executions, folders, projects, statuses, priorities, environments and links. Test case steps \
are exchanged as flat objects with description, testData and expectedResult.";

/// Main MCP server coordinator
///
/// Generic over `E: ApiExecutor`. Production uses `HttpExecutor`; tests
/// substitute a mock to count and inspect API calls.
pub struct ZephyrServer<E: ApiExecutor> {
    test_cases: TestCaseTools<E>,
    test_cycles: TestCycleTools<E>,
    test_executions: TestExecutionTools<E>,
    projects: ProjectTools<E>,
    folders: FolderTools<E>,
    reference: ReferenceTools<E>,
    links: LinkTools<E>,
}

impl<E: ApiExecutor + 'static> ZephyrServer<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self {
            test_cases: TestCaseTools::new(Arc::clone(&executor)),
            test_cycles: TestCycleTools::new(Arc::clone(&executor)),
            test_executions: TestExecutionTools::new(Arc::clone(&executor)),
            projects: ProjectTools::new(Arc::clone(&executor)),
            folders: FolderTools::new(Arc::clone(&executor)),
            reference: ReferenceTools::new(Arc::clone(&executor)),
            links: LinkTools::new(executor),
        }
    }

    /// Every tool this server exposes, with its input schema.
    pub fn tools(&self) -> Vec<Tool> {
        let mut tools = self.test_cases.router().list_all();
        tools.extend(self.test_cycles.router().list_all());
        tools.extend(self.test_executions.router().list_all());
        tools.extend(self.projects.router().list_all());
        tools.extend(self.folders.router().list_all());
        tools.extend(self.reference.router().list_all());
        tools.extend(self.links.router().list_all());
        tools
    }

    /// Validate `arguments` for the named tool and run it.
    ///
    /// Unknown names fail with METHOD_NOT_FOUND. Arguments that do not match
    /// the tool's parameter type fail with VALIDATION_ERROR before any API
    /// request is made.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Option<JsonObject>,
    ) -> Result<CallToolResult, McpError> {
        let arguments = arguments.unwrap_or_default();
        debug!(tool = name, "Dispatching tool call");

        let result = self.route(name, &arguments).await;
        if let Err(err) = &result {
            let arguments = Value::Object(arguments);
            error!(
                tool = name,
                code = err.code.0,
                message = %err.message,
                data = ?err.data,
                arguments = %arguments,
                "Tool call failed"
            );
        }
        result
    }

    async fn route(&self, name: &str, args: &JsonObject) -> Result<CallToolResult, McpError> {
        match name {
            "get_test_case" => self.test_cases.get_test_case(parse(name, args)?).await,
            "list_test_cases" => self.test_cases.list_test_cases(parse(name, args)?).await,
            "create_test_case" => self.test_cases.create_test_case(parse(name, args)?).await,
            "update_test_case" => self.test_cases.update_test_case(parse(name, args)?).await,
            "get_test_case_links" => {
                self.test_cases.get_test_case_links(parse(name, args)?).await
            }
            "create_test_case_issue_link" => {
                self.test_cases
                    .create_test_case_issue_link(parse(name, args)?)
                    .await
            }
            "create_test_case_web_link" => {
                self.test_cases
                    .create_test_case_web_link(parse(name, args)?)
                    .await
            }
            "get_test_case_test_script" => {
                self.test_cases
                    .get_test_case_test_script(parse(name, args)?)
                    .await
            }
            "create_test_case_test_script" => {
                self.test_cases
                    .create_test_case_test_script(parse(name, args)?)
                    .await
            }
            "get_test_case_test_steps" => {
                self.test_cases
                    .get_test_case_test_steps(parse(name, args)?)
                    .await
            }
            "create_test_case_test_steps" => {
                self.test_cases
                    .create_test_case_test_steps(parse(name, args)?)
                    .await
            }
            "update_test_case_test_steps" => {
                self.test_cases
                    .update_test_case_test_steps(parse(name, args)?)
                    .await
            }
            "get_test_cycle" => self.test_cycles.get_test_cycle(parse(name, args)?).await,
            "list_test_cycles" => self.test_cycles.list_test_cycles(parse(name, args)?).await,
            "create_test_cycle" => self.test_cycles.create_test_cycle(parse(name, args)?).await,
            "update_test_cycle" => self.test_cycles.update_test_cycle(parse(name, args)?).await,
            "get_test_execution" => {
                self.test_executions
                    .get_test_execution(parse(name, args)?)
                    .await
            }
            "list_test_executions" => {
                self.test_executions
                    .list_test_executions(parse(name, args)?)
                    .await
            }
            "create_test_execution" => {
                self.test_executions
                    .create_test_execution(parse(name, args)?)
                    .await
            }
            "update_test_execution" => {
                self.test_executions
                    .update_test_execution(parse(name, args)?)
                    .await
            }
            "get_test_execution_test_steps" => {
                self.test_executions
                    .get_test_execution_test_steps(parse(name, args)?)
                    .await
            }
            "update_test_execution_test_steps" => {
                self.test_executions
                    .update_test_execution_test_steps(parse(name, args)?)
                    .await
            }
            "get_project" => self.projects.get_project(parse(name, args)?).await,
            "list_projects" => self.projects.list_projects(parse(name, args)?).await,
            "get_folder" => self.folders.get_folder(parse(name, args)?).await,
            "list_folders" => self.folders.list_folders(parse(name, args)?).await,
            "create_folder" => self.folders.create_folder(parse(name, args)?).await,
            "list_statuses" => self.reference.list_statuses(parse(name, args)?).await,
            "list_priorities" => self.reference.list_priorities(parse(name, args)?).await,
            "list_environments" => self.reference.list_environments(parse(name, args)?).await,
            "delete_link" => self.links.delete_link(parse(name, args)?).await,
            _ => Err(ZephyrError::MethodNotFound {
                tool: name.to_string(),
            }
            .into()),
        }
    }
}

/// Deserialize tool arguments into the tool's parameter type.
fn parse<T: DeserializeOwned>(tool: &str, args: &JsonObject) -> Result<Parameters<T>, McpError> {
    serde_json::from_value(Value::Object(args.clone()))
        .map(Parameters)
        .map_err(|e| {
            ZephyrError::Validation {
                message: format!("Invalid arguments for {tool}"),
                details: json!({ "reason": e.to_string() }),
            }
            .into()
        })
}

impl<E: ApiExecutor + 'static> ServerHandler for ZephyrServer<E> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            protocol_version: ProtocolVersion::LATEST,
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        Ok(ListToolsResult::with_all_items(self.tools()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        self.dispatch(&request.name, request.arguments).await
    }
}
