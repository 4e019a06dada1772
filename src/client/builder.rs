use crate::client::core::ConversationAnalysisClient;
use crate::config::{parse_endpoint, ClientConfig, DEFAULT_API_VERSION};
use crate::credential::KeyCredential;
use crate::transport::{HttpTransport, TransportOptions};
use crate::{Error, ErrorContext, Result};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;

/// Builder for [`ConversationAnalysisClient`].
///
/// `endpoint` and `api_key` are required; everything else has a default.
pub struct ConversationAnalysisClientBuilder {
    endpoint: Option<String>,
    api_key: Option<String>,
    api_version: String,
    transport: TransportOptions,
    max_connections: usize,
}

impl ConversationAnalysisClientBuilder {
    pub fn new() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            api_version: DEFAULT_API_VERSION.to_string(),
            transport: TransportOptions::default(),
            max_connections: 1,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        let mut builder = Self::new()
            .endpoint(config.endpoint.as_str())
            .api_key(config.credential.secret())
            .api_version(config.api_version.clone())
            .timeout(config.timeout);
        builder.transport.proxy_url = config.proxy_url.clone();
        builder
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Overall request timeout; expiry surfaces as a transient error.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.transport.timeout = timeout;
        self
    }

    pub fn proxy_url(mut self, url: impl Into<String>) -> Self {
        self.transport.proxy_url = Some(url.into());
        self
    }

    /// Limit how many calls may hold a connection at once.
    pub fn max_connections(mut self, n: usize) -> Self {
        self.max_connections = n.max(1);
        self
    }

    pub fn build(self) -> Result<ConversationAnalysisClient> {
        let endpoint = self.endpoint.ok_or_else(|| {
            Error::configuration_with_context(
                "endpoint must be specified",
                ErrorContext::new().with_field_path("endpoint"),
            )
        })?;
        let endpoint = parse_endpoint(&endpoint)?;
        let credential = KeyCredential::new(self.api_key.ok_or_else(|| {
            Error::configuration_with_context(
                "API key must be specified",
                ErrorContext::new().with_field_path("api_key"),
            )
        })?)?;
        if self.api_version.trim().is_empty() {
            return Err(Error::configuration_with_context(
                "api version must not be empty",
                ErrorContext::new().with_field_path("api_version"),
            ));
        }
        let transport = HttpTransport::new(&self.transport)?;

        Ok(ConversationAnalysisClient {
            transport,
            endpoint,
            credential,
            api_version: self.api_version,
            slots: Arc::new(Semaphore::new(self.max_connections)),
            max_connections: self.max_connections,
        })
    }
}

impl Default for ConversationAnalysisClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
