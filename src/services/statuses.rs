use std::sync::Arc;

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::error::ZephyrResult;
use crate::client::executor::{ApiExecutor, ApiRequest};
use crate::services::{QueryParams, or_null};

/// Entity a status applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusType {
    TestCase,
    TestCycle,
    TestExecution,
}

impl StatusType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusType::TestCase => "TEST_CASE",
            StatusType::TestCycle => "TEST_CYCLE",
            StatusType::TestExecution => "TEST_EXECUTION",
        }
    }
}

pub struct StatusService<E> {
    executor: Arc<E>,
}

impl<E: ApiExecutor> StatusService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    pub async fn list(
        &self,
        status_type: Option<StatusType>,
        query: QueryParams,
    ) -> ZephyrResult<Value> {
        let query = query.push_opt("statusType", status_type.map(|t| t.as_str()));
        self.executor
            .execute(ApiRequest::get("statuses").with_query_pairs(query.into_pairs()))
            .await
            .map(or_null)
    }
}
