use std::sync::Arc;

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::error::ZephyrResult;
use crate::client::executor::{ApiExecutor, ApiRequest};
use crate::services::{QueryParams, or_null, resource_path};

const COLLECTION: &str = "folders";

/// What a folder holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FolderType {
    TestCase,
    TestCycle,
}

impl FolderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FolderType::TestCase => "TEST_CASE",
            FolderType::TestCycle => "TEST_CYCLE",
        }
    }
}

pub struct FolderService<E> {
    executor: Arc<E>,
}

impl<E: ApiExecutor> FolderService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    pub async fn get(&self, folder_id: u64) -> ZephyrResult<Value> {
        let path = resource_path(COLLECTION, &folder_id.to_string())?;
        self.executor.execute(ApiRequest::get(path)).await.map(or_null)
    }

    pub async fn list(
        &self,
        folder_type: Option<FolderType>,
        query: QueryParams,
    ) -> ZephyrResult<Value> {
        let query = query.push_opt("folderType", folder_type.map(|t| t.as_str()));
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
}
