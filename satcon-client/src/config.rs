//! Satcon client configuration.

use std::time::Duration;

use http::{HeaderMap, HeaderName, HeaderValue};

use crate::{ClientError, Result};

/// Production Satellite Config GraphQL endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://config.satellite.cloud.ibm.com/graphql";

/// Satcon client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// GraphQL endpoint URL.
    pub endpoint: String,
    /// Request timeout applied by the default HTTP executor.
    pub timeout: Duration,
    /// Default headers for all requests.
    pub default_headers: Vec<(String, String)>,
    /// User agent string.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(30),
            default_headers: Vec::new(),
            user_agent: format!("satcon-client/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Create configuration for a specific endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Build the `reqwest` client used as the default HTTP executor.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        let mut headers = HeaderMap::new();
        for (name, value) in &self.default_headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ClientError::Config(format!("invalid header name {name:?}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ClientError::Config(format!("invalid value for header {name}: {e}")))?;
            headers.insert(name, value);
        }

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::Config(format!("failed to build HTTP client: {e}")))
    }
}

/// Builder for satcon client configuration.
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    /// Set the GraphQL endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config
            .default_headers
            .push((name.into(), value.into()));
        self
    }

    /// Set user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ClientConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint() {
        let config = ClientConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("satcon-client/"));
    }

    #[test]
    fn test_builder() {
        let config = ClientConfig::builder()
            .endpoint("http://localhost:3333/graphql")
            .timeout(Duration::from_secs(5))
            .header("x-request-source", "tests")
            .user_agent("custom")
            .build();

        assert_eq!(config.endpoint, "http://localhost:3333/graphql");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.default_headers.len(), 1);
        assert_eq!(config.user_agent, "custom");
        assert!(config.http_client().is_ok());
    }

    #[test]
    fn test_invalid_header_rejected() {
        let config = ClientConfig::builder().header("bad header", "x").build();
        assert!(matches!(config.http_client(), Err(ClientError::Config(_))));
    }
}
