use std::sync::Arc;

use serde_json::Value;

use crate::client::error::ZephyrResult;
use crate::client::executor::{ApiExecutor, ApiRequest};
use crate::services::{QueryParams, or_null};

pub struct EnvironmentService<E> {
    executor: Arc<E>,
}

impl<E: ApiExecutor> EnvironmentService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    pub async fn list(&self, query: QueryParams) -> ZephyrResult<Value> {
        self.executor
            .execute(ApiRequest::get("environments").with_query_pairs(query.into_pairs()))
            .await
            .map(or_null)
    }
}
