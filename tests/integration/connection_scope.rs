//! The connection scope is given back on every exit path.

use crate::integration::mock_server::{
    bali_response, client_for, silent_server, MockServerFixture, DEPLOYMENT, PROJECT, QUERY,
};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_released_after_success() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_analysis(200, &bali_response()).await;
    let client = fixture.create_test_client();

    client
        .analyze_query(QUERY, PROJECT, DEPLOYMENT)
        .await
        .unwrap();
    assert_eq!(client.available_connections(), client.max_connections());
}

#[tokio::test]
async fn test_released_after_failure() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_analysis(401, r#"{"error":{"code":"401","message":"denied"}}"#)
        .await;
    let client = fixture.create_test_client();

    assert!(client
        .analyze_query(QUERY, PROJECT, DEPLOYMENT)
        .await
        .is_err());
    assert_eq!(client.available_connections(), client.max_connections());
}

#[tokio::test]
async fn test_released_on_cancellation() {
    let base_url = silent_server().await;
    let client = Arc::new(client_for(&base_url, Duration::from_secs(30)));

    let task = {
        let client = client.clone();
        tokio::spawn(async move { client.analyze_query(QUERY, PROJECT, DEPLOYMENT).await })
    };

    // Wait until the call holds its connection.
    for _ in 0..50 {
        if client.available_connections() == 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(client.available_connections(), 0);

    task.abort();
    let joined = task.await;
    assert!(joined.unwrap_err().is_cancelled());
    assert_eq!(client.available_connections(), client.max_connections());
}

#[tokio::test]
async fn test_released_when_caller_times_out() {
    let base_url = silent_server().await;
    let client = client_for(&base_url, Duration::from_secs(30));

    let outcome = tokio::time::timeout(
        Duration::from_millis(200),
        client.analyze_query(QUERY, PROJECT, DEPLOYMENT),
    )
    .await;

    assert!(outcome.is_err());
    assert_eq!(client.available_connections(), 1);
}
