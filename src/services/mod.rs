//! Per-resource Zephyr services.
//!
//! Each service is generic over `E: ApiExecutor` and shares the executor
//! through an `Arc`, so the same request path serves every resource.
//!
//! - TestCaseService: test cases, their links, scripts, and steps
//! - TestCycleService: test cycles
//! - TestExecutionService: test executions and their steps
//! - FolderService / ProjectService: folders and projects
//! - StatusService / PriorityService / EnvironmentService: reference data
//! - LinkService: link deletion

mod environments;
mod folders;
mod links;
mod priorities;
mod projects;
mod statuses;
mod test_cases;
mod test_cycles;
mod test_executions;

#[cfg(test)]
mod folders_test;
#[cfg(test)]
mod projects_test;
#[cfg(test)]
mod reference_test;
#[cfg(test)]
mod test_executions_test;

pub use environments::EnvironmentService;
pub use folders::{FolderService, FolderType};
pub use links::LinkService;
pub use priorities::PriorityService;
pub use projects::ProjectService;
pub use statuses::{StatusService, StatusType};
pub use test_cases::{TestCaseParameters, TestCaseService, TestCaseUpdate};
pub use test_cycles::TestCycleService;
pub use test_executions::TestExecutionService;

use serde_json::{Map, Value};

use crate::client::error::{ZephyrError, ZephyrResult};

/// Ordered query parameters for list endpoints.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.0.push((key.to_string(), value.to_string()));
        self
    }

    pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.push(key, value),
            None => self,
        }
    }

    /// Forward scalar entries of `extra` as query parameters.
    ///
    /// Strings, numbers and booleans are converted to their string form.
    /// Nulls, arrays and objects have no query representation and are skipped.
    pub fn extend_scalars(mut self, extra: &Map<String, Value>) -> Self {
        for (key, value) in extra {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => continue,
            };
            self.0.push((key.clone(), rendered));
        }
        self
    }

    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.0
    }
}

/// Build `collection/id`, rejecting identifiers that would escape the
/// resource path.
pub(crate) fn resource_path(collection: &str, id: &str) -> ZephyrResult<String> {
    let id = id.trim();
    if id.is_empty() {
        return Err(ZephyrError::validation(format!(
            "Identifier for '{collection}' must not be empty"
        )));
    }
    if id.contains(['/', '\\', '?', '#']) || is_path_escape(id) {
        return Err(ZephyrError::validation(format!(
            "Identifier '{id}' for '{collection}' contains reserved characters"
        )));
    }
    Ok(format!("{collection}/{id}"))
}

/// True for ids a URL parser would resolve as a dot segment or separator.
fn is_path_escape(id: &str) -> bool {
    let lowered = id.to_ascii_lowercase();
    id == "."
        || id == ".."
        || ["%2e", "%2f", "%5c"]
            .iter()
            .any(|encoded| lowered.contains(encoded))
}

/// Collapse an absent body to JSON `null`.
pub(crate) fn or_null(body: Option<Value>) -> Value {
    body.unwrap_or(Value::Null)
}
