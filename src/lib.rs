//! Zephyr Scale test management exposed as MCP tools.
//!
//! - **client**: HTTP executor, error taxonomy, step pagination
//! - **services**: one service per Zephyr resource
//! - **mcp**: tool catalog, dispatch, and the stdio server
//! - **config** / **logging**: startup settings and tracing

pub mod client;
pub mod config;
pub mod logging;
pub mod mcp;
pub mod services;

#[cfg(test)]
mod config_test;
