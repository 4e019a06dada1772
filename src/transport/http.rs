use reqwest::header::HeaderMap;
use reqwest::Proxy;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// Knobs for the underlying `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct TransportOptions {
    pub timeout: Duration,
    pub pool_max_idle_per_host: usize,
    pub pool_idle_timeout: Duration,
    pub proxy_url: Option<String>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            pool_max_idle_per_host: 8,
            pool_idle_timeout: Duration::from_secs(90),
            proxy_url: None,
        }
    }
}

/// A fully read HTTP response.
#[derive(Debug)]
pub struct HttpReply {
    pub status: u16,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(options: &TransportOptions) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .timeout(options.timeout)
            .pool_max_idle_per_host(options.pool_max_idle_per_host)
            .pool_idle_timeout(Some(options.pool_idle_timeout));

        if let Some(proxy_url) = &options.proxy_url {
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| TransportError::Builder(format!("invalid proxy url: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Builder(e.to_string()))?;

        Ok(Self {
            client,
            timeout: options.timeout,
        })
    }

    /// POST a JSON body and read the whole response.
    ///
    /// Non-2xx statuses are returned as a normal [`HttpReply`]; only failures
    /// to exchange bytes become a [`TransportError`].
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: Url,
        headers: HeaderMap,
        body: &B,
    ) -> Result<HttpReply, TransportError> {
        let response = self
            .client
            .post(url)
            .headers(headers)
            .json(body)
            .send()
            .await
            .map_err(|e| self.map_reqwest(e))?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.text().await.map_err(|e| self.map_reqwest(e))?;

        Ok(HttpReply {
            status,
            headers,
            body,
        })
    }

    fn map_reqwest(&self, err: reqwest::Error) -> TransportError {
        if err.is_timeout() {
            TransportError::Timeout(self.timeout)
        } else {
            // Drop the URL from the message; it carries the project identifiers.
            TransportError::Http(err.without_url())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("HTTP client setup failed: {0}")]
    Builder(String),
}
