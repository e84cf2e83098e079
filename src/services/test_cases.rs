//! Test case operations.

use std::sync::Arc;

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::client::error::{ZephyrError, ZephyrResult};
use crate::client::executor::{ApiExecutor, ApiRequest};
use crate::client::pagination::{StepCollection, fetch_all_steps};
use crate::client::steps::{StepInput, StepsMode, wrap_steps};
use crate::services::{QueryParams, or_null, resource_path};

const COLLECTION: &str = "testcases";

/// Descriptive fields applied on top of the current test case.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseParameters {
    pub objective: Option<String>,
    pub precondition: Option<String>,
    #[schemars(description = "Estimated duration in milliseconds")]
    pub estimated_time: Option<u64>,
    pub labels: Option<Vec<String>>,
    pub custom_fields: Option<Map<String, Value>>,
}

impl TestCaseParameters {
    fn is_empty(&self) -> bool {
        self.objective.is_none()
            && self.precondition.is_none()
            && self.estimated_time.is_none()
            && self.labels.is_none()
            && self.custom_fields.is_none()
    }
}

/// Partial update of a test case. Absent fields keep their current value.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseUpdate {
    #[schemars(description = "New name of the test case")]
    pub name: Option<String>,
    #[schemars(description = "Folder ID to move the test case to (0 removes it from its folder)")]
    pub folder_id: Option<u64>,
    #[schemars(description = "Status ID")]
    pub status_id: Option<u64>,
    #[schemars(description = "Priority ID")]
    pub priority_id: Option<u64>,
    #[schemars(description = "Jira account ID of the owner (empty string clears the owner)")]
    pub owner_id: Option<String>,
    #[schemars(
        description = "Objective, precondition, estimatedTime, labels and customFields to update"
    )]
    pub parameters: Option<TestCaseParameters>,
}

impl TestCaseUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.folder_id.is_none()
            && self.status_id.is_none()
            && self.priority_id.is_none()
            && self.owner_id.is_none()
            && self.parameters.as_ref().is_none_or(TestCaseParameters::is_empty)
    }

    /// Apply this update onto a full test case document.
    pub fn merge_into(&self, doc: &mut Map<String, Value>) {
        if let Some(name) = &self.name {
            doc.insert("name".into(), json!(name));
        }
        if let Some(folder_id) = self.folder_id {
            let folder = if folder_id == 0 {
                Value::Null
            } else {
                json!({ "id": folder_id })
            };
            doc.insert("folder".into(), folder);
        }
        if let Some(status_id) = self.status_id {
            doc.insert("status".into(), json!({ "id": status_id }));
        }
        if let Some(priority_id) = self.priority_id {
            doc.insert("priority".into(), json!({ "id": priority_id }));
        }
        if let Some(owner_id) = &self.owner_id {
            let owner = if owner_id.is_empty() {
                Value::Null
            } else {
                json!({ "accountId": owner_id })
            };
            doc.insert("owner".into(), owner);
        }
        if let Some(params) = &self.parameters {
            if let Some(objective) = &params.objective {
                doc.insert("objective".into(), json!(objective));
            }
            if let Some(precondition) = &params.precondition {
                doc.insert("precondition".into(), json!(precondition));
            }
            if let Some(estimated_time) = params.estimated_time {
                doc.insert("estimatedTime".into(), json!(estimated_time));
            }
            if let Some(labels) = &params.labels {
                doc.insert("labels".into(), json!(labels));
            }
            if let Some(custom_fields) = &params.custom_fields {
                doc.insert("customFields".into(), Value::Object(custom_fields.clone()));
            }
        }
    }
}

pub struct TestCaseService<E> {
    executor: Arc<E>,
}

impl<E: ApiExecutor> TestCaseService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    pub async fn get(&self, key: &str) -> ZephyrResult<Value> {
        let path = resource_path(COLLECTION, key)?;
        self.executor.execute(ApiRequest::get(path)).await.map(or_null)
    }

    pub async fn list(&self, query: QueryParams) -> ZephyrResult<Value> {
        self.executor
            .execute(ApiRequest::get(COLLECTION).with_query_pairs(query.into_pairs()))
            .await
            .map(or_null)
    }

    pub async fn create(&self, body: Value) -> ZephyrResult<Value> {
        self.executor
            .execute(ApiRequest::post(COLLECTION, body))
            .await
            .map(or_null)
    }

    /// Update a test case by merging `update` into its current state.
    ///
    /// The API only accepts full documents, so this reads the test case,
    /// applies the changes and writes the whole document back. There is no
    /// version check: a concurrent writer between the read and the write
    /// is overwritten.
    pub async fn update(&self, key: &str, update: &TestCaseUpdate) -> ZephyrResult<Value> {
        if update.is_empty() {
            return Err(ZephyrError::validation("No fields provided for update."));
        }
        let path = resource_path(COLLECTION, key)?;

        let mut doc = match self.get(key).await? {
            Value::Object(doc) => doc,
            other => {
                return Err(ZephyrError::Internal {
                    message: format!("Unexpected test case payload for {key}"),
                    details: other,
                });
            }
        };
        update.merge_into(&mut doc);

        let response = self
            .executor
            .execute(ApiRequest::put(path, Value::Object(doc)))
            .await?;

        match response {
            Some(Value::Object(body)) if !body.is_empty() => Ok(Value::Object(body)),
            Some(body) if !body.is_object() && !body.is_null() => Ok(body),
            _ => {
                debug!(key, "Update returned no body, re-reading test case");
                self.get(key).await
            }
        }
    }

    pub async fn links(&self, key: &str) -> ZephyrResult<Value> {
        let path = format!("{}/links", resource_path(COLLECTION, key)?);
        self.executor.execute(ApiRequest::get(path)).await.map(or_null)
    }

    pub async fn create_issue_link(&self, key: &str, issue_key: &str) -> ZephyrResult<Value> {
        let path = format!("{}/links/issues", resource_path(COLLECTION, key)?);
        self.executor
            .execute(ApiRequest::post(path, json!({ "issueKey": issue_key })))
            .await
            .map(or_null)
    }

    /// Link a web page. Without a description the URL doubles as one.
    pub async fn create_web_link(
        &self,
        key: &str,
        url: &str,
        description: Option<&str>,
    ) -> ZephyrResult<Value> {
        let path = format!("{}/links/weblinks", resource_path(COLLECTION, key)?);
        let body = json!({ "url": url, "description": description.unwrap_or(url) });
        self.executor
            .execute(ApiRequest::post(path, body))
            .await
            .map(or_null)
    }

    pub async fn test_script(&self, key: &str) -> ZephyrResult<Value> {
        let path = format!("{}/testscript", resource_path(COLLECTION, key)?);
        self.executor.execute(ApiRequest::get(path)).await.map(or_null)
    }

    pub async fn create_test_script(&self, key: &str, script: Value) -> ZephyrResult<Value> {
        let path = format!("{}/testscript", resource_path(COLLECTION, key)?);
        self.executor
            .execute(ApiRequest::post(path, script))
            .await
            .map(or_null)
    }

    /// All steps of a test case, across every page.
    pub async fn test_steps(&self, key: &str) -> ZephyrResult<StepCollection> {
        let path = format!("{}/teststeps", resource_path(COLLECTION, key)?);
        fetch_all_steps(self.executor.as_ref(), &path).await
    }

    pub async fn create_test_steps(
        &self,
        key: &str,
        mode: StepsMode,
        steps: &[StepInput],
    ) -> ZephyrResult<Value> {
        let path = format!("{}/teststeps", resource_path(COLLECTION, key)?);
        self.executor
            .execute(ApiRequest::post(path, wrap_steps(mode, steps)))
            .await
            .map(or_null)
    }
}
