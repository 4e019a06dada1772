use crate::credential::{KeyCredential, SUBSCRIPTION_KEY_HEADER};
use crate::transport::HttpTransport;
use crate::types::{AnalysisRequest, AnalysisResult};
use crate::{Error, ErrorContext, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Semaphore;
use tracing::{debug, info};
use url::Url;
use uuid::Uuid;

use super::builder::ConversationAnalysisClientBuilder;
use super::classification::classify_failure;
use super::scope::ConnectionScope;

pub(crate) const ANALYZE_PATH: &str = "language/:analyze-conversations";
pub(crate) const REQUEST_ID_HEADER: &str = "x-ms-client-request-id";

/// Client for the conversation analysis endpoint.
///
/// One call is one request/response exchange; nothing is retried here. Use
/// [`Error::is_retryable`] and [`Error::retry_after`] to drive a retry loop in
/// the caller.
pub struct ConversationAnalysisClient {
    pub(crate) transport: HttpTransport,
    pub(crate) endpoint: Url,
    pub(crate) credential: KeyCredential,
    pub(crate) api_version: String,
    pub(crate) slots: Arc<Semaphore>,
    pub(crate) max_connections: usize,
}

impl ConversationAnalysisClient {
    pub fn builder() -> ConversationAnalysisClientBuilder {
        ConversationAnalysisClientBuilder::new()
    }

    /// Build a client from a loaded [`ClientConfig`](crate::ClientConfig).
    pub fn from_config(config: &crate::ClientConfig) -> Result<Self> {
        ConversationAnalysisClientBuilder::from_config(config).build()
    }

    /// Send `request` and return the normalized prediction.
    ///
    /// The returned result echoes `request.query()` exactly, and when a top
    /// intent is set it is `prediction.intents[0]`.
    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let _scope = ConnectionScope::acquire(&self.slots).await?;

        let request_id = Uuid::new_v4().to_string();
        let url = self.analyze_url(request)?;
        let headers = self.headers(&request_id)?;

        debug!(
            request_id = request_id.as_str(),
            project = request.project_name(),
            deployment = request.deployment_name(),
            "sending conversation analysis request"
        );

        let start = Instant::now();
        let reply = self
            .transport
            .post_json(url, headers, &request.body())
            .await
            .map_err(|e| {
                let err = Error::from(e);
                let context = err
                    .context()
                    .cloned()
                    .unwrap_or_default()
                    .with_request_id(request_id.as_str());
                err.with_context(context)
            })?;

        if !reply.is_success() {
            let err = classify_failure(&reply, &self.credential, &request_id);
            info!(
                http_status = reply.status,
                standard_code = err
                    .context()
                    .and_then(|c| c.standard_code)
                    .map(|c| c.name())
                    .unwrap_or("unknown"),
                request_id = request_id.as_str(),
                duration_ms = start.elapsed().as_millis() as u64,
                "conversation analysis request failed"
            );
            return Err(err);
        }

        let result: AnalysisResult = serde_json::from_str(&reply.body).map_err(|e| {
            Error::invalid_response_with_context(
                format!("malformed response body: {}", e),
                ErrorContext::new()
                    .with_status_code(reply.status)
                    .with_request_id(request_id.as_str())
                    .with_source("analyze"),
            )
        })?;
        let result = result.normalize(request.query())?;

        info!(
            http_status = reply.status,
            request_id = request_id.as_str(),
            top_intent = result.prediction.top_intent.as_deref().unwrap_or(""),
            intents = result.prediction.intents.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "conversation analysis completed"
        );
        Ok(result)
    }

    /// Validate the pieces and call [`analyze`](Self::analyze).
    pub async fn analyze_query(
        &self,
        query: &str,
        project_name: &str,
        deployment_name: &str,
    ) -> Result<AnalysisResult> {
        let request = AnalysisRequest::new(query, project_name, deployment_name)?;
        self.analyze(&request).await
    }

    /// Connection slots currently free; equals [`max_connections`](Self::max_connections) when idle.
    pub fn available_connections(&self) -> usize {
        self.slots.available_permits()
    }

    pub fn max_connections(&self) -> usize {
        self.max_connections
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub(crate) fn analyze_url(&self, request: &AnalysisRequest) -> Result<Url> {
        let mut url = self.endpoint.join(ANALYZE_PATH).map_err(|e| {
            Error::configuration_with_context(
                format!("cannot build request URL: {}", e),
                ErrorContext::new().with_field_path("endpoint"),
            )
        })?;
        url.query_pairs_mut()
            .append_pair("projectName", request.project_name())
            .append_pair("deploymentName", request.deployment_name())
            .append_pair("api-version", &self.api_version);
        Ok(url)
    }

    fn headers(&self, request_id: &str) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(SUBSCRIPTION_KEY_HEADER, self.credential.header_value()?);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Ok(id) = HeaderValue::from_str(request_id) {
            headers.insert(REQUEST_ID_HEADER, id);
        }
        Ok(headers)
    }
}
