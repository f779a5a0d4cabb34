//! User registry integration tests.
//!
//! These run against a real PostgreSQL database provisioned by
//! `#[sqlx::test]` and are ignored unless `DATABASE_URL` is available.

use registry_test_utils::TestRegistryServer;
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_create_user_returns_201(pool: PgPool) -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::spawn(pool).await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/users", server.url()))
        .json(&json!({"name": "Ada"}))
        .send()
        .await?;

    assert_eq!(response.status(), 201);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body["name"], "Ada");
    assert!(body["id"].as_i64().is_some_and(|id| id > 0));

    let snapshot = server.metrics().snapshot();
    assert_eq!(snapshot.total_requests, 1);
    assert_eq!(snapshot.successful_requests, 1);
    assert!((snapshot.success_rate - 100.0).abs() < f64::EPSILON);

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_list_users_empty(pool: PgPool) -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::spawn(pool).await?;

    let response = reqwest::get(format!("{}/users", server.url())).await?;

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await?;
    assert_eq!(body, json!([]));

    Ok(())
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_list_users_ordered_by_id(pool: PgPool) -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::spawn(pool).await?;
    let client = reqwest::Client::new();

    for name in ["Ada", "Grace", "Barbara"] {
        let response = client
            .post(format!("{}/users", server.url()))
            .json(&json!({ "name": name }))
            .send()
            .await?;
        assert_eq!(response.status(), 201);
    }

    let body: serde_json::Value = client
        .get(format!("{}/users", server.url()))
        .send()
        .await?
        .json()
        .await?;

    let names: Vec<&str> = body
        .as_array()
        .map(|users| users.iter().filter_map(|u| u["name"].as_str()).collect())
        .unwrap_or_default();
    assert_eq!(names, vec!["Ada", "Grace", "Barbara"]);

    let snapshot = server.metrics().snapshot();
    assert_eq!(snapshot.total_requests, 4);
    assert_eq!(snapshot.successful_requests, 4);

    Ok(())
}

/// With a real database behind it, fault mode still never writes.
#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL via DATABASE_URL"]
async fn test_fault_mode_writes_nothing(pool: PgPool) -> Result<(), anyhow::Error> {
    let server = TestRegistryServer::builder()
        .pool(pool.clone())
        .fault_mode(true)
        .spawn()
        .await?;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/users", server.url()))
        .json(&json!({"name": "Ada"}))
        .send()
        .await?;
    assert_eq!(response.status(), 500);

    let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await?;
    assert_eq!(count.0, 0);

    // Reads are unaffected
    let response = client.get(format!("{}/users", server.url())).send().await?;
    assert_eq!(response.status(), 200);

    Ok(())
}
