//! Model Context Protocol (MCP) server implementation
//!
//! This module exposes the Zephyr Scale tools to an MCP host over stdio.
//!
//! - **server**: `ZephyrServer`, the catalog and the dispatch boundary
//! - **tools**: separate tool structs per Zephyr resource
//!   - TestCaseTools, TestCycleTools, TestExecutionTools
//!   - ProjectTools, FolderTools
//!   - ReferenceTools: statuses, priorities, environments
//!   - LinkTools: link removal
//! - **service**: stdio transport and shutdown handling
//!
//! Every tool struct is generic over `E: ApiExecutor`, so the whole server
//! can run against a mock executor in tests.

pub mod server;
mod service;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_support;

pub use server::ZephyrServer;
pub use service::{ServeError, serve_stdio};
