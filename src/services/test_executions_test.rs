use std::sync::Arc;

use mockall::Sequence;
use serde_json::json;

use crate::client::executor::{HttpMethod, MockApiExecutor};
use crate::services::{QueryParams, TestExecutionService};

#[tokio::test]
async fn list_forwards_cycle_filter() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| {
            req.path == "testexecutions" && req.query_value("testCycle") == Some("PROJ-R1")
        })
        .times(1)
        .returning(|_| Ok(Some(json!({ "values": [{ "key": "PROJ-E1" }] }))));

    let result = TestExecutionService::new(Arc::new(mock))
        .list(QueryParams::new().push("testCycle", "PROJ-R1"))
        .await
        .unwrap();

    assert_eq!(result["values"][0]["key"], "PROJ-E1");
}

#[tokio::test]
async fn test_steps_aggregate_pages() {
    let mut mock = MockApiExecutor::new();
    let mut seq = Sequence::new();
    mock.expect_execute()
        .withf(|req| {
            req.path == "testexecutions/PROJ-E1/teststeps" && req.query_value("startAt") == Some("0")
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            let values: Vec<_> = (0..100)
                .map(|i| json!({ "inline": { "description": format!("s{i}"), "status": { "name": "Pass" } } }))
                .collect();
            Ok(Some(json!({ "total": 101, "values": values })))
        });
    mock.expect_execute()
        .withf(|req| {
            req.path == "testexecutions/PROJ-E1/teststeps"
                && req.query_value("startAt") == Some("100")
        })
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| {
            Ok(Some(json!({
                "total": 101,
                "values": [{ "inline": { "description": "s100", "actualResult": "Broken" } }],
            })))
        });

    let steps = TestExecutionService::new(Arc::new(mock))
        .test_steps("PROJ-E1")
        .await
        .unwrap();

    assert_eq!(steps.total, 101);
    assert_eq!(steps.values[0]["status"]["name"], "Pass");
    assert_eq!(steps.values[100]["actualResult"], "Broken");
}

#[tokio::test]
async fn update_test_steps_puts_body_as_given() {
    let body = json!({ "steps": [{ "actualResult": "ok", "statusName": "Pass" }] });
    let expected = body.clone();
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(move |req| {
            req.method == HttpMethod::Put
                && req.path == "testexecutions/PROJ-E1/teststeps"
                && req.body.as_ref() == Some(&expected)
        })
        .times(1)
        .returning(|_| Ok(None));

    TestExecutionService::new(Arc::new(mock))
        .update_test_steps("PROJ-E1", body)
        .await
        .unwrap();
}

#[tokio::test]
async fn update_puts_to_execution() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| req.method == HttpMethod::Put && req.path == "testexecutions/PROJ-E2")
        .times(1)
        .returning(|_| Ok(Some(json!({ "id": 2 }))));

    let result = TestExecutionService::new(Arc::new(mock))
        .update("PROJ-E2", json!({ "statusName": "Fail" }))
        .await
        .unwrap();

    assert_eq!(result["id"], 2);
}
