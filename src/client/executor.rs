//! HTTP request execution against the Zephyr Scale API.
//!
//! [`ApiExecutor`] is the single capability every service depends on. The
//! production implementation, [`HttpExecutor`], attaches the bearer
//! credential, classifies the response status, and decodes JSON bodies.

use std::fmt;

use async_trait::async_trait;
use reqwest::{
    Client, Method,
    header::{ACCEPT, CONTENT_TYPE},
};
use secrecy::ExposeSecret;
use serde_json::Value;
use tracing::{debug, error, warn};
use url::Url;

use crate::client::error::{ZephyrError, ZephyrResult};
use crate::config::Config;

#[cfg(test)]
use mockall::automock;

const JSON_MIME: &str = "application/json";

/// HTTP verbs used by the Zephyr API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

/// A single request against the API, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub path: String,
    pub body: Option<Value>,
    pub query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Post, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Value) -> Self {
        Self::new(HttpMethod::Put, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    pub fn with_query_pairs(mut self, pairs: Vec<(String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }
}

#[cfg(test)]
impl ApiRequest {
    /// Look up a query value by key.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Executes API requests.
///
/// Returns `Ok(None)` for successful responses without a JSON body
/// (e.g. `204 No Content`).
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ApiExecutor: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> ZephyrResult<Option<Value>>;
}

/// reqwest-backed executor.
pub struct HttpExecutor {
    client: Client,
    config: Config,
}

impl HttpExecutor {
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Resolve a request path and query against the base URL.
    pub fn resolve_url(&self, path: &str, query: &[(String, String)]) -> Result<Url, url::ParseError> {
        let mut url = self.config.base_url().join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl ApiExecutor for HttpExecutor {
    async fn execute(&self, request: ApiRequest) -> ZephyrResult<Option<Value>> {
        let ApiRequest {
            method,
            path,
            body,
            query,
        } = request;

        let url = self
            .resolve_url(&path, &query)
            .map_err(|e| ZephyrError::transport(e.to_string(), method, &path))?;

        debug!(%method, %url, "Sending Zephyr API request");

        let mut builder = self
            .client
            .request(method.into(), url.clone())
            .bearer_auth(self.config.api_key().expose_secret())
            .header(CONTENT_TYPE, JSON_MIME)
            .header(ACCEPT, JSON_MIME);
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            error!(%method, %path, error = %e, "Zephyr API request failed");
            ZephyrError::transport(e.to_string(), method, &path)
        })?;

        let status = response.status();
        if !status.is_success() {
            let raw = match response.text().await {
                Ok(raw) => raw,
                Err(e) => {
                    warn!(%method, %url, error = %e, "Failed to read Zephyr API error body");
                    String::new()
                }
            };
            warn!(%method, %url, status = status.as_u16(), "Zephyr API returned an error status");
            return Err(ZephyrError::from_status(status.as_u16(), &raw, url.as_str()));
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|value| value.contains(JSON_MIME));
        if !is_json {
            return Ok(None);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ZephyrError::transport(e.to_string(), method, &path))?;
        if bytes.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| ZephyrError::transport(e.to_string(), method, &path))
    }
}
