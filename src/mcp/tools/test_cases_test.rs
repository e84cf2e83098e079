//! Tests for test case MCP tools

use std::sync::Arc;

use rmcp::handler::server::wrapper::Parameters;
use serde_json::{Map, json};

use crate::client::executor::{HttpMethod, MockApiExecutor};
use crate::client::steps::{StepInput, StepsMode};
use crate::mcp::test_support::result_json;
use crate::mcp::tools::test_cases::{
    CreateTestCaseParams, TestCaseKeyParams, ListTestCasesParams, ScriptType, TestCaseTools, TestScriptParams,
    TestStepsParams, UpdateTestCaseParams, WebLinkParams,
};
use crate::services::TestCaseUpdate;

fn tools(mock: MockApiExecutor) -> TestCaseTools<MockApiExecutor> {
    TestCaseTools::new(Arc::new(mock))
}

#[tokio::test]
async fn list_test_cases_forwards_extra_filters() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| {
            req.path == "testcases"
                && req.query_value("projectKey") == Some("PROJ")
                && req.query_value("maxResults") == Some("25")
                && req.query_value("labels") == Some("smoke")
                && req.query_value("folderId").is_none()
        })
        .times(1)
        .returning(|_| Ok(Some(json!({ "values": [{ "key": "PROJ-T1" }] }))));

    let mut extra = Map::new();
    extra.insert("labels".into(), json!("smoke"));
    let result = tools(mock)
        .list_test_cases(Parameters(ListTestCasesParams {
            project_key: Some("PROJ".into()),
            max_results: Some(25),
            extra,
            ..Default::default()
        }))
        .await
        .unwrap();

    assert_eq!(result_json(&result)["values"][0]["key"], "PROJ-T1");
}

#[tokio::test]
async fn create_test_case_sends_only_provided_fields() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| {
            req.method == HttpMethod::Post
                && req.path == "testcases"
                && req.body
                    == Some(json!({ "name": "Checkout", "projectKey": "PROJ", "priorityId": 2 }))
        })
        .times(1)
        .returning(|_| Ok(Some(json!({ "id": 9, "key": "PROJ-T9" }))));

    let result = tools(mock)
        .create_test_case(Parameters(CreateTestCaseParams {
            name: "Checkout".into(),
            project_key: "PROJ".into(),
            priority_id: Some(2),
            ..Default::default()
        }))
        .await
        .unwrap();

    assert_eq!(result_json(&result)["key"], "PROJ-T9");
}

#[tokio::test]
async fn update_test_case_without_fields_is_rejected() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute().times(0);

    let err = tools(mock)
        .update_test_case(Parameters(UpdateTestCaseParams {
            test_case_key: "PROJ-T1".into(),
            update: TestCaseUpdate::default(),
        }))
        .await
        .unwrap_err();

    assert_eq!(err.data.unwrap()["kind"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn web_link_uses_given_description() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| {
            req.body == Some(json!({ "url": "https://wiki.example.com", "description": "Design notes" }))
        })
        .times(1)
        .returning(|_| Ok(Some(json!({ "id": 1 }))));

    tools(mock)
        .create_test_case_web_link(Parameters(WebLinkParams {
            test_case_key: "PROJ-T1".into(),
            url: "https://wiki.example.com".into(),
            description: Some("Design notes".into()),
        }))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_script_body_excludes_key() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| {
            req.path == "testcases/PROJ-T1/testscript"
                && req.body == Some(json!({ "type": "BDD", "text": "Given a user" }))
        })
        .times(1)
        .returning(|_| Ok(Some(json!({ "id": 4 }))));

    tools(mock)
        .create_test_case_test_script(Parameters(TestScriptParams {
            test_case_key: "PROJ-T1".into(),
            script_type: ScriptType::Bdd,
            text: Some("Given a user".into()),
            steps: None,
            extra: Map::new(),
        }))
        .await
        .unwrap();
}

#[tokio::test]
async fn update_test_steps_posts_like_create() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| {
            let Some(body) = &req.body else {
                return false;
            };
            req.method == HttpMethod::Post
                && req.path == "testcases/PROJ-T1/teststeps"
                && body["mode"] == "OVERWRITE"
                && body["items"][0]["inline"]["testData"] == "user=alice"
        })
        .times(1)
        .returning(|_| Ok(Some(json!({ "id": 12 }))));

    let result = tools(mock)
        .update_test_case_test_steps(Parameters(TestStepsParams {
            test_case_key: "PROJ-T1".into(),
            steps: vec![StepInput {
                description: "Log in".into(),
                test_data: Some("user=alice".into()),
                expected_result: "Dashboard shown".into(),
            }],
            mode: StepsMode::default(),
        }))
        .await
        .unwrap();

    assert_eq!(result_json(&result)["id"], 12);
}

#[test]
fn steps_mode_defaults_to_overwrite_when_omitted() {
    let params: TestStepsParams = serde_json::from_value(json!({
        "testCaseKey": "PROJ-T1",
        "steps": [{ "description": "a", "expectedResult": "b" }],
    }))
    .unwrap();

    assert_eq!(params.mode, StepsMode::Overwrite);
    assert_eq!(params.steps[0].test_data, None);
}

#[test]
fn update_params_flatten_update_fields() {
    let params: UpdateTestCaseParams = serde_json::from_value(json!({
        "testCaseKey": "PROJ-T1",
        "statusId": 3,
        "parameters": { "objective": "New goal" },
    }))
    .unwrap();

    assert_eq!(params.update.status_id, Some(3));
    assert_eq!(
        params.update.parameters.unwrap().objective.as_deref(),
        Some("New goal")
    );
}

#[tokio::test]
async fn get_test_case_without_case_body_returns_only_steps() {
    let mut mock = MockApiExecutor::new();
    mock.expect_execute()
        .withf(|req| req.path == "testcases/PROJ-T1")
        .times(1)
        .returning(|_| Ok(None));
    mock.expect_execute()
        .withf(|req| req.path == "testcases/PROJ-T1/teststeps")
        .times(1)
        .returning(|_| {
            Ok(Some(json!({
                "isLast": true,
                "values": [{ "inline": { "description": "Open page" } }],
            })))
        });

    let result = tools(mock)
        .get_test_case(Parameters(TestCaseKeyParams {
            test_case_key: "PROJ-T1".into(),
        }))
        .await
        .unwrap();

    assert_eq!(
        result_json(&result),
        json!({ "testSteps": [{ "description": "Open page" }] })
    );
}
