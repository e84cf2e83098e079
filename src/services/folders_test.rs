use std::sync::Arc;

use serde_json::json;

use crate::client::error::{ErrorKind, ZephyrError};
use crate::client::executor::{HttpMethod, MockApiExecutor};
use crate::services::{FolderService, FolderType, QueryParams};

#[tokio::test]
async fn get_uses_numeric_id() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| req.method == HttpMethod::Get && req.path == "folders/42")
        .times(1)
        .returning(|_| Ok(Some(json!({ "id": 42, "name": "Regression" }))));

    let folder = FolderService::new(Arc::new(mock)).get(42).await.unwrap();

    assert_eq!(folder["name"], "Regression");
}

#[tokio::test]
async fn missing_folder_is_not_found_with_url() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .times(1)
        .returning(|_| {
            Err(ZephyrError::from_status(
                404,
                r#"{"message":"Folder not found"}"#,
                "https://api.example.com/v2/folders/9",
            ))
        });

    let err = FolderService::new(Arc::new(mock)).get(9).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        err.details()["requestedUrl"],
        "https://api.example.com/v2/folders/9"
    );
}

#[tokio::test]
async fn list_adds_folder_type() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| {
            req.path == "folders"
                && req.query_value("projectKey") == Some("PROJ")
                && req.query_value("folderType") == Some("TEST_CYCLE")
        })
        .times(1)
        .returning(|_| Ok(Some(json!({ "values": [] }))));

    FolderService::new(Arc::new(mock))
        .list(
            Some(FolderType::TestCycle),
            QueryParams::new().push("projectKey", "PROJ"),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn create_posts_body() {
    let body = json!({ "name": "Smoke", "folderType": "TEST_CASE", "projectKey": "PROJ" });
    let expected = body.clone();
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(move |req| {
            req.method == HttpMethod::Post
                && req.path == "folders"
                && req.body.as_ref() == Some(&expected)
        })
        .times(1)
        .returning(|_| Ok(Some(json!({ "id": 100 }))));

    let created = FolderService::new(Arc::new(mock)).create(body).await.unwrap();

    assert_eq!(created["id"], 100);
}

#[test]
fn folder_type_uses_api_names() {
    assert_eq!(serde_json::to_value(FolderType::TestCase).unwrap(), "TEST_CASE");
    assert_eq!(
        serde_json::from_value::<FolderType>(json!("TEST_CYCLE")).unwrap(),
        FolderType::TestCycle
    );
    assert!(serde_json::from_value::<FolderType>(json!("TEST_PLAN")).is_err());
}
