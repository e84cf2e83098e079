use std::sync::Arc;

use serde_json::json;

use crate::client::error::ErrorKind;
use crate::client::executor::MockApiExecutor;
use crate::services::{ProjectService, QueryParams};

#[tokio::test]
async fn get_project_by_key() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| req.path == "projects/PROJ")
        .times(1)
        .returning(|_| Ok(Some(json!({ "id": 1, "key": "PROJ" }))));

    let project = ProjectService::new(Arc::new(mock)).get("PROJ").await.unwrap();

    assert_eq!(project["key"], "PROJ");
}

#[tokio::test]
async fn list_returns_values_envelope() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| req.path == "projects" && req.query_value("maxResults") == Some("5"))
        .times(1)
        .returning(|_| Ok(Some(json!({ "values": [{ "key": "PROJ" }], "total": 1 }))));

    let projects = ProjectService::new(Arc::new(mock))
        .list(QueryParams::new().push("maxResults", 5))
        .await
        .unwrap();

    assert_eq!(projects["values"][0]["key"], "PROJ");
}

#[tokio::test]
async fn list_without_values_is_internal_error() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .times(1)
        .returning(|_| Ok(Some(json!({ "items": [] }))));

    let err = ProjectService::new(Arc::new(mock))
        .list(QueryParams::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Internal);
    assert_eq!(err.details()["details"]["receivedData"], json!({ "items": [] }));
}

#[tokio::test]
async fn list_with_empty_body_is_internal_error() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute().times(1).returning(|_| Ok(None));

    let err = ProjectService::new(Arc::new(mock))
        .list(QueryParams::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Internal);
}
