//! Metrics, deployment info and version endpoint integration tests.

use chrono::DateTime;
use registry_test_utils::TestRegistryServer;
use serde_json::json;
use tokio::task::JoinSet;

#[tokio::test]
async fn test_metrics_start_at_zero() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder().spawn().await?;

    let response = reqwest::get(format!("{}/metrics", server.url())).await?;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["total_requests"], 0);
    assert_eq!(body["successful_requests"], 0);
    assert_eq!(body["failed_requests"], 0);
    assert_eq!(body["success_rate"], 0.0);
    assert_eq!(body["average_latency_ms"], 0.0);
    assert_eq!(body["healthy"], true);
    assert!(body["uptime"].is_string());

    Ok(())
}

/// Concurrent writes all land in the counters.
#[tokio::test]
async fn test_concurrent_requests_are_all_counted() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder().fault_mode(true).spawn().await?;
    let client = reqwest::Client::new();

    let mut tasks = JoinSet::new();
    for i in 0..50 {
        let client = client.clone();
        let url = format!("{}/users", server.url());
        tasks.spawn(async move {
            client
                .post(url)
                .json(&json!({ "name": format!("user-{i}") }))
                .send()
                .await
                .map(|r| r.status().as_u16())
        });
    }

    while let Some(joined) = tasks.join_next().await {
        assert_eq!(joined??, 500);
    }

    let snapshot = server.metrics().snapshot();
    assert_eq!(snapshot.total_requests, 50);
    assert_eq!(snapshot.failed_requests, 50);

    Ok(())
}

#[tokio::test]
async fn test_deployment_info_reflects_metrics() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder()
        .version("v4")
        .environment("staging")
        .fault_mode(true)
        .spawn()
        .await?;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/users", server.url()))
        .json(&json!({"name": "Ada"}))
        .send()
        .await?;

    let response = client
        .get(format!("{}/deployment-info", server.url()))
        .send()
        .await?;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["version"], "v4");
    assert_eq!(body["environment"], "staging");
    assert_eq!(body["healthy"], true);
    assert_eq!(body["total_requests"], 1);
    assert_eq!(body["success_rate"], 0.0);

    let timestamp = body["timestamp"].as_str().unwrap_or_default();
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());

    Ok(())
}

/// Reading deployment info is not itself a counted request.
#[tokio::test]
async fn test_deployment_info_is_read_only() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder().spawn().await?;

    for _ in 0..3 {
        reqwest::get(format!("{}/deployment-info", server.url())).await?;
    }

    assert_eq!(server.metrics().snapshot().total_requests, 0);

    Ok(())
}

#[tokio::test]
async fn test_version_endpoint() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder().version("v9").spawn().await?;

    let response = reqwest::get(format!("{}/version", server.url())).await?;
    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["version"], "v9");
    assert!(body["timestamp"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_prometheus_endpoint_serves_text() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder().spawn().await?;

    let response = reqwest::get(format!("{}/metrics/prometheus", server.url())).await?;
    assert_eq!(response.status(), 200);
    response.text().await?;

    Ok(())
}
