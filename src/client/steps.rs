//! Test step envelope normalization.
//!
//! The API nests step content in an `inline` object. Tools read and write
//! flat step objects, so the conversion in both directions lives here.

use rmcp::schemars::{self, JsonSchema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// How new steps are combined with the existing script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepsMode {
    #[default]
    Overwrite,
    Append,
}

/// A flat test step as accepted from tool callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct StepInput {
    #[schemars(description = "Step description")]
    pub description: String,
    #[schemars(description = "Test data for the step (optional)")]
    pub test_data: Option<String>,
    #[schemars(description = "Expected result of the step")]
    pub expected_result: String,
}

/// Build the request body for creating test case steps.
pub fn wrap_steps(mode: StepsMode, steps: &[StepInput]) -> Value {
    let items: Vec<Value> = steps
        .iter()
        .map(|step| {
            json!({
                "inline": {
                    "description": step.description,
                    "testData": step.test_data,
                    "expectedResult": step.expected_result,
                    "customFields": {},
                    "reflectRef": null,
                },
                "testCase": null,
            })
        })
        .collect();

    json!({ "mode": mode, "items": items })
}

/// Hoist the fields of an `inline` envelope to the top level.
///
/// Other top-level keys are kept, except a `null` `testCase` marker. Steps
/// without an `inline` object are returned unchanged.
pub fn flatten_step(step: Value) -> Value {
    let Value::Object(mut outer) = step else {
        return step;
    };

    let inline = match outer.remove("inline") {
        Some(Value::Object(inline)) => inline,
        Some(other) => {
            outer.insert("inline".into(), other);
            return Value::Object(outer);
        }
        None => return Value::Object(outer),
    };

    if outer.get("testCase").is_some_and(Value::is_null) {
        outer.remove("testCase");
    }

    let mut flat: Map<String, Value> = inline;
    for (key, value) in outer {
        flat.entry(key).or_insert(value);
    }
    Value::Object(flat)
}
