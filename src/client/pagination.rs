//! Multi-page step retrieval.
//!
//! Step listings are paged by the API. [`fetch_all_steps`] walks the pages
//! in order and returns one collection with the server's ordering intact.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::client::error::{ZephyrError, ZephyrResult};
use crate::client::executor::{ApiExecutor, ApiRequest};
use crate::client::steps::flatten_step;

/// Number of steps requested per page.
pub const STEP_PAGE_SIZE: u64 = 100;

/// Upper bound on pages fetched for one listing.
pub const MAX_STEP_PAGES: usize = 1000;

/// One page of steps, normalized from either list envelope the API uses.
#[derive(Debug, Default, PartialEq)]
pub struct StepPage {
    pub items: Vec<Value>,
    pub total: Option<u64>,
    pub is_last: Option<bool>,
    /// Remaining envelope fields (`startAt`, `next`, ...).
    pub envelope: Map<String, Value>,
}

impl StepPage {
    /// Normalize a page response. Both `values` and the older `items` field
    /// are accepted for the step list.
    pub fn from_response(response: Option<Value>) -> Self {
        let Some(Value::Object(mut envelope)) = response else {
            return Self::default();
        };

        let items = match envelope.remove("values") {
            Some(Value::Array(values)) => {
                envelope.remove("items");
                values
            }
            _ => match envelope.remove("items") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
        };
        let total = envelope.remove("total").and_then(|v| v.as_u64());
        let is_last = envelope.remove("isLast").and_then(|v| v.as_bool());
        envelope.remove("maxResults");

        Self {
            items,
            total,
            is_last,
            envelope,
        }
    }
}

/// Every step of a resource, in server order.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StepCollection {
    #[serde(flatten)]
    pub envelope: Map<String, Value>,
    pub values: Vec<Value>,
    pub total: usize,
    pub max_results: u64,
}

/// Fetch every page of the steps sub-resource at `path`.
///
/// Pages are requested sequentially with `maxResults`/`startAt`. Fetching
/// stops when the page reports `isLast`, or, without that flag, once the
/// collected count reaches the reported `total`. A page with no items that
/// is not flagged as last also ends the walk.
pub async fn fetch_all_steps<E>(executor: &E, path: &str) -> ZephyrResult<StepCollection>
where
    E: ApiExecutor + ?Sized,
{
    let mut steps: Vec<Value> = Vec::new();
    let mut first_envelope: Option<Map<String, Value>> = None;
    let mut start_at: u64 = 0;

    for page_number in 0..MAX_STEP_PAGES {
        let request = ApiRequest::get(path)
            .with_query("maxResults", STEP_PAGE_SIZE)
            .with_query("startAt", start_at);
        let page = StepPage::from_response(executor.execute(request).await?);

        debug!(
            path,
            page = page_number,
            start_at,
            received = page.items.len(),
            "Fetched step page"
        );

        let received = page.items.len();
        steps.extend(page.items.into_iter().map(flatten_step));
        if first_envelope.is_none() {
            first_envelope = Some(page.envelope);
        }

        let finished = match page.is_last {
            Some(is_last) => is_last,
            None => steps.len() as u64 >= page.total.unwrap_or(steps.len() as u64),
        };
        if finished {
            return Ok(collect(first_envelope, steps));
        }
        if received == 0 {
            warn!(path, start_at, "Empty step page not marked as last, stopping");
            return Ok(collect(first_envelope, steps));
        }

        start_at += STEP_PAGE_SIZE;
    }

    Err(ZephyrError::Internal {
        message: format!("Step pagination for '{path}' did not finish within {MAX_STEP_PAGES} pages"),
        details: serde_json::json!({ "path": path, "collected": steps.len() }),
    })
}

fn collect(envelope: Option<Map<String, Value>>, values: Vec<Value>) -> StepCollection {
    StepCollection {
        envelope: envelope.unwrap_or_default(),
        total: values.len(),
        values,
        max_results: STEP_PAGE_SIZE,
    }
}
