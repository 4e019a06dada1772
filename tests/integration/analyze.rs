//! Successful analysis and fail-fast paths.

use crate::integration::mock_server::{
    bali_response, client_for, MockServerFixture, API_KEY, DEPLOYMENT, PROJECT, QUERY,
};
use conversation_analysis::{
    AnalysisRequest, AnalysisResult, ClientConfig, ConversationAnalysisClient, Error, ProjectKind,
    Report,
};
use mockito::Matcher;
use std::collections::HashMap;
use std::time::Duration;

#[tokio::test]
async fn test_bali_query_routes_to_book_flight() {
    let mut fixture = MockServerFixture::new().await;
    let body = bali_response();
    let mock = fixture
        .analysis_mock(200, &body)
        .match_body(Matcher::Json(serde_json::json!({ "query": QUERY })))
        .match_header(
            "x-ms-client-request-id",
            Matcher::Regex("^[0-9a-f-]{36}$".to_string()),
        )
        .expect(1)
        .create_async()
        .await;

    let client = fixture.create_test_client();
    let request = AnalysisRequest::new(QUERY, PROJECT, DEPLOYMENT).unwrap();
    let result = client.analyze(&request).await.expect("analysis failed");

    mock.assert_async().await;
    assert_eq!(result.query, QUERY);
    assert_eq!(result.prediction.project_kind, ProjectKind::Orchestration);
    assert_eq!(result.prediction.top_intent.as_deref(), Some("BookFlight"));

    let intents = &result.prediction.intents;
    assert_eq!(intents[0].name, "BookFlight");
    assert!(intents[0].confidence_score > 0.5);
    assert!(intents
        .iter()
        .all(|i| (0.0..=1.0).contains(&i.confidence_score)));

    let top = result.top_intent().unwrap();
    assert_eq!(top.target_kind.as_deref(), Some("luis"));
    let luis = top.result.as_ref().unwrap();
    assert_eq!(luis["prediction"]["topIntent"], "BookFlight");
}

#[tokio::test]
async fn test_report_for_bali_query() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_analysis(200, &bali_response()).await;

    let client = fixture.create_test_client();
    let result = client
        .analyze_query(QUERY, PROJECT, DEPLOYMENT)
        .await
        .unwrap();

    let text = Report::new(&result).to_string();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], format!("query: {}", QUERY));
    assert_eq!(lines[1], "project kind: Orchestration");
    assert_eq!(lines[4], "\ttop intent: BookFlight");
    assert_eq!(lines[5], "\tconfidence score: 0.92");
    assert!(lines[8].starts_with("\tluis response: {"));
}

#[tokio::test]
async fn test_list_intents_top_moved_first() {
    let mut fixture = MockServerFixture::new().await;
    let body = serde_json::json!({
        "query": QUERY,
        "prediction": {
            "projectKind": "Orchestration",
            "topIntent": "BookFlight",
            "intents": [
                { "category": "None", "targetKind": "non_linked", "confidenceScore": 0.1 },
                { "category": "Travel", "targetKind": "conversation", "confidenceScore": 0.8 },
                { "category": "BookFlight", "targetKind": "luis", "confidenceScore": 0.7 }
            ]
        }
    })
    .to_string();
    let _mock = fixture.mock_analysis(200, &body).await;

    let result = fixture
        .create_test_client()
        .analyze_query(QUERY, PROJECT, DEPLOYMENT)
        .await
        .unwrap();

    let names: Vec<&str> = result
        .prediction
        .intents
        .iter()
        .map(|i| i.name.as_str())
        .collect();
    assert_eq!(names, ["BookFlight", "Travel", "None"]);
}

#[tokio::test]
async fn test_missing_top_intent_filled_from_ranking() {
    let mut fixture = MockServerFixture::new().await;
    let body = serde_json::json!({
        "query": QUERY,
        "prediction": {
            "projectKind": "Conversation",
            "intents": [
                { "category": "Low", "confidenceScore": 0.2 },
                { "category": "High", "confidenceScore": 0.9 }
            ]
        }
    })
    .to_string();
    let _mock = fixture.mock_analysis(200, &body).await;

    let result = fixture
        .create_test_client()
        .analyze_query(QUERY, PROJECT, DEPLOYMENT)
        .await
        .unwrap();

    assert_eq!(result.prediction.top_intent.as_deref(), Some("High"));
    assert_eq!(result.prediction.intents[0].name, "High");
    let text = Report::new(&result).to_string();
    assert!(text.contains("\ttop intent: High\n"), "{}", text);
    assert!(!text.contains("(none)"));
}

#[tokio::test]
async fn test_empty_query_never_reaches_network() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable().await;

    let err = fixture
        .create_test_client()
        .analyze_query("", PROJECT, DEPLOYMENT)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Validation { .. }), "{:?}", err);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_deployment_never_reaches_network() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable().await;

    let err = fixture
        .create_test_client()
        .analyze_query(QUERY, PROJECT, "")
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Configuration { .. }), "{:?}", err);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_config_never_reaches_network() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_unreachable().await;

    let full: HashMap<&str, String> = HashMap::from([
        ("AZURE_CONVERSATIONS_ENDPOINT", fixture.base_url.clone()),
        ("AZURE_CONVERSATIONS_KEY", API_KEY.to_string()),
        ("AZURE_CONVERSATIONS_WORKFLOW_PROJECT", PROJECT.to_string()),
    ]);

    for missing in full.keys() {
        let env: HashMap<&str, String> = full
            .iter()
            .filter(|(k, _)| *k != missing)
            .map(|(k, v)| (*k, v.clone()))
            .collect();

        let err = analyze_from_env(&env).await.unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }), "{:?}", err);
        assert!(err.to_string().contains(missing), "{} not named in {}", missing, err);
    }

    mock.assert_async().await;
}

async fn analyze_from_env(env: &HashMap<&str, String>) -> Result<AnalysisResult, Error> {
    let config = ClientConfig::from_lookup(|name| env.get(name).cloned())?;
    let client = ConversationAnalysisClient::from_config(&config)?;
    client
        .analyze_query(QUERY, &config.project_name, &config.deployment_name)
        .await
}

#[tokio::test]
async fn test_echo_mismatch_rejected() {
    let mut fixture = MockServerFixture::new().await;
    let body = serde_json::json!({
        "query": "some other query",
        "prediction": { "projectKind": "Orchestration", "intents": [] }
    })
    .to_string();
    let _mock = fixture.mock_analysis(200, &body).await;

    let err = fixture
        .create_test_client()
        .analyze_query(QUERY, PROJECT, DEPLOYMENT)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidResponse { .. }), "{:?}", err);
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_analysis(200, "<html>gateway</html>").await;

    let err = fixture
        .create_test_client()
        .analyze_query(QUERY, PROJECT, DEPLOYMENT)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidResponse { .. }), "{:?}", err);
    assert!(err.context().and_then(|c| c.request_id.as_ref()).is_some());
}

#[tokio::test]
async fn test_endpoint_with_path_prefix() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/nlu/language/:analyze-conversations")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(bali_response())
        .create_async()
        .await;

    let client = client_for(&format!("{}/nlu", server.url()), Duration::from_secs(5));
    client
        .analyze_query(QUERY, PROJECT, DEPLOYMENT)
        .await
        .unwrap();
    mock.assert_async().await;
}
