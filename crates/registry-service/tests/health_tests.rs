//! Health endpoint integration tests.
//!
//! Tests `/health` and the liveness toggle using the `TestRegistryServer`
//! harness. No database is required.

use registry_test_utils::TestRegistryServer;
use serde_json::json;

/// Test that health endpoint returns 200 and healthy status.
#[tokio::test]
async fn test_health_endpoint_returns_200() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder().version("v7").spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 200);

    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], "v7");
    assert!(body["uptime"].as_str().is_some_and(|u| !u.is_empty()));
    assert!(body.get("error").is_none());

    Ok(())
}

/// Test that health endpoint returns JSON content type.
#[tokio::test]
async fn test_health_endpoint_returns_json() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder().spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/health", server.url()))
        .send()
        .await?;

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok());

    assert!(
        content_type.is_some_and(|ct| ct.contains("application/json")),
        "Expected application/json content type, got {:?}",
        content_type
    );

    Ok(())
}

/// Unhealthy and ready at the same time: the probes are independent.
#[tokio::test]
async fn test_unhealthy_process_stays_ready() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder()
        .admin_endpoints(true)
        .spawn()
        .await?;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/admin/liveness", server.url()))
        .json(&json!({"healthy": false}))
        .send()
        .await?;
    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["healthy"], false);

    let health = client
        .get(format!("{}/health", server.url()))
        .send()
        .await?;
    assert_eq!(health.status(), 503);
    let body: serde_json::Value = health.json().await?;
    assert_eq!(body["status"], "unhealthy");
    assert!(body["error"].is_string());

    let ready = client.get(format!("{}/ready", server.url())).send().await?;
    assert_eq!(ready.status(), 200);
    let body: serde_json::Value = ready.json().await?;
    assert_eq!(body["ready"], true);

    Ok(())
}

/// Test that liveness can be restored after being cleared.
#[tokio::test]
async fn test_liveness_toggle_restores_health() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder()
        .admin_endpoints(true)
        .spawn()
        .await?;
    let client = reqwest::Client::new();

    for healthy in [false, true] {
        let response = client
            .put(format!("{}/admin/liveness", server.url()))
            .json(&json!({ "healthy": healthy }))
            .send()
            .await?;
        assert_eq!(response.status(), 200);
    }

    let health = client
        .get(format!("{}/health", server.url()))
        .send()
        .await?;
    assert_eq!(health.status(), 200);
    assert!(server.metrics().is_healthy());

    Ok(())
}

/// Toggling liveness is not a business call.
#[tokio::test]
async fn test_liveness_toggle_does_not_count_requests() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder()
        .admin_endpoints(true)
        .spawn()
        .await?;
    let client = reqwest::Client::new();

    client
        .put(format!("{}/admin/liveness", server.url()))
        .json(&json!({"healthy": false}))
        .send()
        .await?;
    client
        .get(format!("{}/health", server.url()))
        .send()
        .await?;

    assert_eq!(server.metrics().snapshot().total_requests, 0);

    Ok(())
}

/// Test that an invalid liveness body is rejected.
#[tokio::test]
async fn test_liveness_toggle_rejects_invalid_body() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder()
        .admin_endpoints(true)
        .spawn()
        .await?;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/admin/liveness", server.url()))
        .json(&json!({"healthy": "nope"}))
        .send()
        .await?;

    assert_eq!(response.status(), 400);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
    assert!(server.metrics().is_healthy());

    Ok(())
}

/// Admin routes do not exist unless enabled.
#[tokio::test]
async fn test_admin_routes_absent_by_default() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder().spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/admin/liveness", server.url()))
        .json(&json!({"healthy": false}))
        .send()
        .await?;

    assert_eq!(response.status(), 404);
    assert!(server.metrics().is_healthy());

    Ok(())
}

/// Test that non-existent routes return 404.
#[tokio::test]
async fn test_unknown_route_returns_404() -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder().spawn().await?;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/nonexistent", server.url()))
        .send()
        .await?;

    assert_eq!(response.status(), 404);

    Ok(())
}
