use std::sync::Arc;

use serde_json::Value;

use crate::client::error::ZephyrResult;
use crate::client::executor::{ApiExecutor, ApiRequest};
use crate::services::{QueryParams, or_null, resource_path};

const COLLECTION: &str = "testcycles";

pub struct TestCycleService<E> {
    executor: Arc<E>,
}

impl<E: ApiExecutor> TestCycleService<E> {
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

    /// Replace the cycle's fields with `body` in a single PUT.
    pub async fn update(&self, id_or_key: &str, body: Value) -> ZephyrResult<Value> {
        let path = resource_path(COLLECTION, id_or_key)?;
        self.executor
            .execute(ApiRequest::put(path, body))
            .await
            .map(or_null)
    }
}
