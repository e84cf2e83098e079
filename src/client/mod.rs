//! Zephyr Scale REST client.
//!
//! - **executor**: request building, authentication, and response classification
//! - **error**: the error taxonomy shared by every layer
//! - **pagination**: aggregation of paged step listings
//! - **steps**: conversion between flat steps and the API's `inline` envelope

pub mod error;
pub mod executor;
pub mod pagination;
pub mod steps;

#[cfg(test)]
mod error_test;

pub use error::{ErrorKind, ZephyrError, ZephyrResult};
pub use executor::{ApiExecutor, ApiRequest, HttpExecutor, HttpMethod};
pub use pagination::{StepCollection, fetch_all_steps};
