//! Tests for error classification and MCP conversion.

use rmcp::model::{ErrorCode, ErrorData};
use serde_json::json;

use crate::client::error::{ErrorKind, ZephyrError};

#[test]
fn status_401_and_403_are_auth_errors() {
    for status in [401, 403] {
        let err = ZephyrError::from_status(status, "", "https://x/testcases/A-T1");
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(err.status(), Some(status));
    }
}

#[test]
fn status_404_records_requested_url() {
    let err = ZephyrError::from_status(404, r#"{"errorCode":404}"#, "https://x/folders/9");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let details = err.details();
    assert_eq!(details["status"], 404);
    assert_eq!(details["error"], json!({ "errorCode": 404 }));
    assert_eq!(details["requestedUrl"], "https://x/folders/9");
}

#[test]
fn other_statuses_are_api_errors_without_url() {
    let err = ZephyrError::from_status(500, "Internal meltdown", "https://x/statuses");
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.to_string(), "Zephyr API Error: HTTP 500");

    let details = err.details();
    assert_eq!(details["status"], 500);
    assert_eq!(details["error"], "Internal meltdown");
    assert!(!details.contains_key("requestedUrl"));
}

#[test]
fn transport_error_keeps_method_and_path() {
    let err = ZephyrError::transport("connection refused", "PUT", "/testcycles/R1");
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), None);

    let details = err.details();
    assert_eq!(details["originalError"], "connection refused");
    assert_eq!(details["method"], "PUT");
    assert_eq!(details["path"], "/testcycles/R1");
}

#[test]
fn kinds_have_stable_names() {
    assert_eq!(ErrorKind::Validation.as_str(), "VALIDATION_ERROR");
    assert_eq!(ErrorKind::Auth.as_str(), "AUTH_ERROR");
    assert_eq!(ErrorKind::NotFound.as_str(), "NOT_FOUND");
    assert_eq!(ErrorKind::Api.as_str(), "API_ERROR");
    assert_eq!(ErrorKind::Transport.as_str(), "TRANSPORT_ERROR");
    assert_eq!(ErrorKind::MethodNotFound.as_str(), "METHOD_NOT_FOUND");
    assert_eq!(ErrorKind::Internal.to_string(), "INTERNAL_ERROR");
}

#[test]
fn converts_to_mcp_error_data() {
    let err = ZephyrError::from_status(404, "gone", "https://x/links/3");

    let data: ErrorData = err.into();

    assert_eq!(data.code, ErrorCode(-32004));
    assert_eq!(data.message, "Zephyr API Error: HTTP 404");
    let payload = data.data.unwrap();
    assert_eq!(payload["kind"], "NOT_FOUND");
    assert_eq!(payload["requestedUrl"], "https://x/links/3");
}

#[test]
fn validation_and_method_not_found_use_json_rpc_codes() {
    let data: ErrorData = ZephyrError::validation("Invalid arguments for get_folder").into();
    assert_eq!(data.code, ErrorCode::INVALID_PARAMS);
    assert_eq!(data.data.unwrap()["kind"], "VALIDATION_ERROR");

    let data: ErrorData = ZephyrError::MethodNotFound {
        tool: "launch_rocket".into(),
    }
    .into();
    assert_eq!(data.code, ErrorCode::METHOD_NOT_FOUND);
    assert_eq!(data.message, "Tool 'launch_rocket' not found");
}

#[test]
fn auth_and_api_errors_use_zephyr_codes() {
    assert_eq!(ErrorKind::Auth.code(), -32001);
    assert_eq!(ErrorKind::Api.code(), -38129);
    assert_eq!(ErrorKind::Internal.code(), ErrorCode::INTERNAL_ERROR.0);
}
