use std::sync::Arc;

use serde_json::{Value, json};

use crate::client::error::{ZephyrError, ZephyrResult};
use crate::client::executor::{ApiExecutor, ApiRequest};
use crate::services::{QueryParams, or_null, resource_path};

const COLLECTION: &str = "projects";

pub struct ProjectService<E> {
    executor: Arc<E>,
}

impl<E: ApiExecutor> ProjectService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    pub async fn get(&self, id_or_key: &str) -> ZephyrResult<Value> {
        let path = resource_path(COLLECTION, id_or_key)?;
        self.executor.execute(ApiRequest::get(path)).await.map(or_null)
    }

    /// List projects. The response must carry a `values` array.
    pub async fn list(&self, query: QueryParams) -> ZephyrResult<Value> {
        let body = self
            .executor
            .execute(ApiRequest::get(COLLECTION).with_query_pairs(query.into_pairs()))
            .await
            .map(or_null)?;

        if !body.get("values").is_some_and(Value::is_array) {
            return Err(ZephyrError::Internal {
                message: "Received unexpected structure from project listing".into(),
                details: json!({ "receivedData": body }),
            });
        }
        Ok(body)
    }
}
