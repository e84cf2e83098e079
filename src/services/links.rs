use std::sync::Arc;

use crate::client::error::ZephyrResult;
use crate::client::executor::{ApiExecutor, ApiRequest};
use crate::services::resource_path;

pub struct LinkService<E> {
    executor: Arc<E>,
}

impl<E: ApiExecutor> LinkService<E> {
    pub fn new(executor: Arc<E>) -> Self {
        Self { executor }
    }

    /// Delete a link. Any response body is discarded.
    pub async fn delete(&self, link_id: u64) -> ZephyrResult<()> {
        let path = resource_path("links", &link_id.to_string())?;
        self.executor.execute(ApiRequest::delete(path)).await?;
        Ok(())
    }
}
