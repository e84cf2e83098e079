//! Test execution operations.

use std::sync::Arc;

use serde_json::Value;

use crate::client::error::ZephyrResult;
use crate::client::executor::{ApiExecutor, ApiRequest};
use crate::client::pagination::{StepCollection, fetch_all_steps};
use crate::services::{QueryParams, or_null, resource_path};

const COLLECTION: &str = "testexecutions";

pub struct TestExecutionService<E> {
    executor: Arc<E>,
}

impl<E: ApiExecutor> TestExecutionService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    pub async fn get(&self, id_or_key: &str) -> ZephyrResult<Value> {
        let path = resource_path(COLLECTION, id_or_key)?;
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

    pub async fn update(&self, id_or_key: &str, body: Value) -> ZephyrResult<Value> {
        let path = resource_path(COLLECTION, id_or_key)?;
        self.executor
            .execute(ApiRequest::put(path, body))
            .await
            .map(or_null)
    }

    /// Execution steps with their recorded status and actual result, across
    /// every page.
    pub async fn test_steps(&self, id_or_key: &str) -> ZephyrResult<StepCollection> {
        let path = format!("{}/teststeps", resource_path(COLLECTION, id_or_key)?);
        fetch_all_steps(self.executor.as_ref(), &path).await
    }

    /// The body is forwarded as given. The API usually answers with no content.
    pub async fn update_test_steps(&self, id_or_key: &str, body: Value) -> ZephyrResult<Value> {
        let path = format!("{}/teststeps", resource_path(COLLECTION, id_or_key)?);
        self.executor
            .execute(ApiRequest::put(path, body))
            .await
            .map(or_null)
    }
}
