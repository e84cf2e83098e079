//! Zephyr error taxonomy.
//!
//! Every failure a tool call can produce is classified once, where it
//! originates, into one of the [`ErrorKind`]s below. Higher layers propagate
//! the classified error with `?` and never wrap it again. The only conversion
//! happens at the MCP boundary via `From<ZephyrError> for ErrorData`.

use std::fmt;

use miette::Diagnostic;
use rmcp::model::{ErrorCode, ErrorData};
use serde_json::{Map, Value, json};
use thiserror::Error;

/// Machine-readable classification of a [`ZephyrError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Auth,
    NotFound,
    Api,
    Transport,
    MethodNotFound,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "VALIDATION_ERROR",
            ErrorKind::Auth => "AUTH_ERROR",
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::Api => "API_ERROR",
            ErrorKind::Transport => "TRANSPORT_ERROR",
            ErrorKind::MethodNotFound => "METHOD_NOT_FOUND",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    /// JSON-RPC error code reported to the MCP host.
    pub fn code(&self) -> i32 {
        match self {
            ErrorKind::Validation => ErrorCode::INVALID_PARAMS.0,
            ErrorKind::Auth => -32001,
            ErrorKind::NotFound => -32004,
            ErrorKind::Api => -38129,
            ErrorKind::Transport | ErrorKind::Internal => ErrorCode::INTERNAL_ERROR.0,
            ErrorKind::MethodNotFound => ErrorCode::METHOD_NOT_FOUND.0,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while serving a tool call.
#[derive(Error, Diagnostic, Debug)]
pub enum ZephyrError {
    #[error("{message}")]
    #[diagnostic(code(zephyr_mcp::validation))]
    Validation { message: String, details: Value },

    #[error("Zephyr API Error: HTTP {status}")]
    #[diagnostic(
        code(zephyr_mcp::auth),
        help("Check that ZEPHYR_API_KEY is valid and has access to this resource.")
    )]
    Auth { status: u16, body: Value },

    #[error("Zephyr API Error: HTTP {status}")]
    #[diagnostic(code(zephyr_mcp::not_found))]
    NotFound { status: u16, body: Value, url: String },

    #[error("Zephyr API Error: HTTP {status}")]
    #[diagnostic(code(zephyr_mcp::api))]
    Api { status: u16, body: Value },

    #[error("Failed to complete request: {message}")]
    #[diagnostic(code(zephyr_mcp::transport))]
    Transport {
        message: String,
        method: String,
        path: String,
    },

    #[error("Tool '{tool}' not found")]
    #[diagnostic(code(zephyr_mcp::method_not_found))]
    MethodNotFound { tool: String },

    #[error("{message}")]
    #[diagnostic(code(zephyr_mcp::internal))]
    Internal { message: String, details: Value },
}

/// Result type for Zephyr operations.
pub type ZephyrResult<T> = Result<T, ZephyrError>;

impl ZephyrError {
    /// Classify a non-success HTTP response.
    ///
    /// The body is kept as parsed JSON when possible and as raw text otherwise.
    pub fn from_status(status: u16, raw_body: &str, url: &str) -> Self {
        let body = serde_json::from_str(raw_body)
            .unwrap_or_else(|_| Value::String(raw_body.to_string()));

        match status {
            401 | 403 => ZephyrError::Auth { status, body },
            404 => ZephyrError::NotFound {
                status,
                body,
                url: url.to_string(),
            },
            _ => ZephyrError::Api { status, body },
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ZephyrError::Validation {
            message: message.into(),
            details: Value::Null,
        }
    }

    pub fn transport(
        message: impl Into<String>,
        method: impl fmt::Display,
        path: impl Into<String>,
    ) -> Self {
        ZephyrError::Transport {
            message: message.into(),
            method: method.to_string(),
            path: path.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ZephyrError::Internal {
            message: message.into(),
            details: Value::Null,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ZephyrError::Validation { .. } => ErrorKind::Validation,
            ZephyrError::Auth { .. } => ErrorKind::Auth,
            ZephyrError::NotFound { .. } => ErrorKind::NotFound,
            ZephyrError::Api { .. } => ErrorKind::Api,
            ZephyrError::Transport { .. } => ErrorKind::Transport,
            ZephyrError::MethodNotFound { .. } => ErrorKind::MethodNotFound,
            ZephyrError::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// HTTP status of the failed response, if one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ZephyrError::Auth { status, .. }
            | ZephyrError::NotFound { status, .. }
            | ZephyrError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Diagnostic details attached to the error.
    pub fn details(&self) -> Map<String, Value> {
        let mut details = Map::new();
        match self {
            ZephyrError::Validation { details: extra, .. }
            | ZephyrError::Internal { details: extra, .. } => {
                if !extra.is_null() {
                    details.insert("details".into(), extra.clone());
                }
            }
            ZephyrError::Auth { status, body } | ZephyrError::Api { status, body } => {
                details.insert("status".into(), json!(status));
                details.insert("error".into(), body.clone());
            }
            ZephyrError::NotFound { status, body, url } => {
                details.insert("status".into(), json!(status));
                details.insert("error".into(), body.clone());
                details.insert("requestedUrl".into(), json!(url));
            }
            ZephyrError::Transport {
                message,
                method,
                path,
            } => {
                details.insert("originalError".into(), json!(message));
                details.insert("method".into(), json!(method));
                details.insert("path".into(), json!(path));
            }
            ZephyrError::MethodNotFound { tool } => {
                details.insert("tool".into(), json!(tool));
            }
        }
        details
    }
}

impl From<ZephyrError> for ErrorData {
    fn from(err: ZephyrError) -> Self {
        let kind = err.kind();
        let mut data = err.details();
        data.insert("kind".into(), json!(kind.as_str()));
        ErrorData::new(ErrorCode(kind.code()), err.to_string(), Some(Value::Object(data)))
    }
}
