//! HTTP client utilities for the storefront catalog.
//!
//! A small builder API over `reqwest` with a base URL, default headers,
//! a per-client timeout and buffered JSON responses.
//!
//! # Example
//!
//! ```rust,ignore
//! use storefront_data::FetchClient;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Product {
//!     id: u64,
//!     title: String,
//!     price: f64,
//! }
//!
//! let client = FetchClient::new().with_base_url("https://fakestoreapi.com");
//!
//! let product: Product = client
//!     .get("/products/1")
//!     .send()
//!     .await?
//!     .error_for_status()?
//!     .json()?;
//! ```

mod error;
mod request;
mod response;

use std::collections::HashMap;
use std::time::Duration;

pub use error::FetchError;
pub use request::RequestBuilder;
pub use response::Response;

/// Default timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// HTTP client for making outbound requests.
#[derive(Debug, Clone)]
pub struct FetchClient {
    inner: reqwest::Client,
    base_url: Option<String>,
    default_headers: HashMap<String, String>,
    timeout: Duration,
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new()
    }
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
            base_url: None,
            default_headers: HashMap::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a client with a base URL that will be prepended to relative paths.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Add a default header that will be included in all requests.
    pub fn with_default_header(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The configured base URL, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request. Relative paths are joined to the base URL.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        let full_url = self.resolve(url.into());

        let mut builder = RequestBuilder::new(full_url);
        for (key, value) in &self.default_headers {
            builder = builder.header(key.clone(), value.clone());
        }

        ClientRequestBuilder {
            client: self.inner.clone(),
            timeout: self.timeout,
            builder,
        }
    }

    fn resolve(&self, url: String) -> String {
        match &self.base_url {
            Some(base) if !(url.starts_with("http://") || url.starts_with("https://")) => {
                format!(
                    "{}/{}",
                    base.trim_end_matches('/'),
                    url.trim_start_matches('/')
                )
            }
            _ => url,
        }
    }
}

/// A request builder bound to a client.
pub struct ClientRequestBuilder {
    client: reqwest::Client,
    timeout: Duration,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// The request as it will be sent.
    pub fn as_request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and buffer the whole response.
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder { url, headers } = self.builder;

        tracing::debug!(url = %url, "sending request");

        let mut request = self.client.get(&url).timeout(self.timeout);
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| transport_error(&url, e))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| transport_error(&url, e))?
            .to_vec();

        tracing::debug!(url = %url, status, bytes = body.len(), "received response");

        Ok(Response::new(url, status, headers, body))
    }
}

fn transport_error(url: &str, e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(url.to_string())
    } else if e.is_builder() {
        FetchError::InvalidUrl(url.to_string())
    } else {
        FetchError::RequestError {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FetchClient, FetchError, Response};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_paths_join_base_url() {
        let client = FetchClient::new().with_base_url("https://fakestoreapi.com/");
        let req = client.get("/products/3");
        assert_eq!(req.as_request().url(), "https://fakestoreapi.com/products/3");

        let req = client.get("products");
        assert_eq!(req.as_request().url(), "https://fakestoreapi.com/products");
    }

    #[test]
    fn test_absolute_urls_bypass_base_url() {
        let client = FetchClient::new().with_base_url("https://fakestoreapi.com");
        let req = client.get("https://example.com/other");
        assert_eq!(req.as_request().url(), "https://example.com/other");
    }

    #[test]
    fn test_default_headers_are_applied() {
        let client = FetchClient::new().with_default_header("Accept", "application/json");
        let req = client.get("https://fakestoreapi.com/products");
        assert_eq!(
            req.as_request().headers.get("Accept").map(String::as_str),
            Some("application/json")
        );
    }

    #[tokio::test]
    async fn test_invalid_url_is_reported() {
        let client = FetchClient::new();
        let err = client.get("not a url").send().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::InvalidUrl(_) | FetchError::RequestError { .. }
        ));
    }
}
