//! Mock HTTP server setup for integration tests

use conversation_analysis::config::DEFAULT_API_VERSION;
use conversation_analysis::ConversationAnalysisClient;
use mockito::{Matcher, Mock, Server, ServerGuard};
use std::time::Duration;

pub const ANALYZE_PATH: &str = "/language/:analyze-conversations";
pub const API_KEY: &str = "test-secret-key-123";
pub const PROJECT: &str = "orchestration-demo";
pub const DEPLOYMENT: &str = "production";
pub const QUERY: &str = "book me a flight ticket to Bali";

/// Test fixture that manages a mock server
pub struct MockServerFixture {
    pub server: ServerGuard,
    pub base_url: String,
}

impl MockServerFixture {
    pub async fn new() -> Self {
        let server = Server::new_async().await;
        let base_url = server.url();
        Self { server, base_url }
    }

    /// Create a client pointed at the mock server
    pub fn create_test_client(&self) -> ConversationAnalysisClient {
        client_for(&self.base_url, Duration::from_secs(5))
    }

    /// Mock the analyze endpoint for the default project and deployment
    pub async fn mock_analysis(&mut self, status: u16, body: &str) -> Mock {
        self.analysis_mock(status, body).create_async().await
    }

    /// Same as `mock_analysis`, but the mock must never be hit
    pub async fn mock_unreachable(&mut self) -> Mock {
        self.analysis_mock(200, &bali_response())
            .expect(0)
            .create_async()
            .await
    }

    pub fn analysis_mock(&mut self, status: u16, body: &str) -> Mock {
        self.server
            .mock("POST", ANALYZE_PATH)
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("projectName".into(), PROJECT.into()),
                Matcher::UrlEncoded("deploymentName".into(), DEPLOYMENT.into()),
                Matcher::UrlEncoded("api-version".into(), DEFAULT_API_VERSION.into()),
            ]))
            .match_header("ocp-apim-subscription-key", API_KEY)
            .with_status(status as usize)
            .with_header("content-type", "application/json")
            .with_body(body)
    }
}

pub fn client_for(base_url: &str, timeout: Duration) -> ConversationAnalysisClient {
    ConversationAnalysisClient::builder()
        .endpoint(base_url)
        .api_key(API_KEY)
        .timeout(timeout)
        .build()
        .expect("Failed to build client")
}

/// Accepts connections and never answers.
pub async fn silent_server() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{}", addr)
}

/// Orchestration prediction routed to a LUIS project.
pub fn bali_response() -> String {
    serde_json::json!({
        "query": QUERY,
        "prediction": {
            "projectKind": "workflow",
            "topIntent": "BookFlight",
            "intents": {
                "Weather": {
                    "targetKind": "conversation",
                    "confidenceScore": 0.04
                },
                "BookFlight": {
                    "targetKind": "luis",
                    "confidenceScore": 0.92,
                    "result": {
                        "query": QUERY,
                        "prediction": {
                            "topIntent": "BookFlight",
                            "intents": { "BookFlight": { "score": 0.97 } },
                            "entities": { "Destination": ["Bali"] }
                        }
                    }
                }
            }
        }
    })
    .to_string()
}
