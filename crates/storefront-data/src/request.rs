//! HTTP request builder.

use std::collections::HashMap;

/// A GET request to a JSON endpoint.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub(crate) url: String,
    pub(crate) headers: HashMap<String, String>,
}

impl RequestBuilder {
    /// Create a new request builder.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
        }
    }

    /// The target URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Add a header to the request. A later value for the same key wins.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_headers() {
        let req = RequestBuilder::new("https://fakestoreapi.com/products")
            .header("Accept", "text/plain")
            .header("Accept", "application/json");

        assert_eq!(req.url(), "https://fakestoreapi.com/products");
        assert_eq!(req.headers.len(), 1);
        assert_eq!(req.headers.get("Accept").map(String::as_str), Some("application/json"));
    }
}
