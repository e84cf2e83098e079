//! Tests for statuses, priorities, environments, and links.

use std::sync::Arc;

use serde_json::json;

use crate::client::error::{ErrorKind, ZephyrError};
use crate::client::executor::{HttpMethod, MockApiExecutor};
use crate::services::{
    EnvironmentService, LinkService, PriorityService, QueryParams, StatusService, StatusType,
};

#[tokio::test]
async fn statuses_filter_by_type_and_project() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| {
            req.path == "statuses"
                && req.query_value("projectKey") == Some("PROJ")
                && req.query_value("statusType") == Some("TEST_EXECUTION")
        })
        .times(1)
        .returning(|_| Ok(Some(json!({ "values": [{ "name": "Pass" }] }))));

    let statuses = StatusService::new(Arc::new(mock))
        .list(
            Some(StatusType::TestExecution),
            QueryParams::new().push("projectKey", "PROJ"),
        )
        .await
        .unwrap();

    assert_eq!(statuses["values"][0]["name"], "Pass");
}

#[tokio::test]
async fn statuses_without_type_send_no_type() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| req.path == "statuses" && req.query.is_empty())
        .times(1)
        .returning(|_| Ok(Some(json!({ "values": [] }))));

    StatusService::new(Arc::new(mock))
        .list(None, QueryParams::new())
        .await
        .unwrap();
}

#[tokio::test]
async fn priorities_list() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| req.method == HttpMethod::Get && req.path == "priorities")
        .times(1)
        .returning(|_| Ok(Some(json!({ "values": [{ "name": "High" }] }))));

    let priorities = PriorityService::new(Arc::new(mock))
        .list(QueryParams::new())
        .await
        .unwrap();

    assert_eq!(priorities["values"][0]["name"], "High");
}

#[tokio::test]
async fn environments_surface_server_errors() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| req.path == "environments")
        .times(1)
        .returning(|_| Err(ZephyrError::from_status(503, "unavailable", "https://x/environments")));

    let err = EnvironmentService::new(Arc::new(mock))
        .list(QueryParams::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn link_delete_ignores_empty_body() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| req.method == HttpMethod::Delete && req.path == "links/15")
        .times(1)
        .returning(|_| Ok(None));

    LinkService::new(Arc::new(mock)).delete(15).await.unwrap();
}

#[test]
fn status_type_rejects_unknown_values() {
    assert_eq!(StatusType::TestCycle.as_str(), "TEST_CYCLE");
    assert!(serde_json::from_value::<StatusType>(json!("TEST_PLAN")).is_err());
}
