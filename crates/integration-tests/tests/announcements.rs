//! Integration tests for announcements and push subscriptions.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running with VAPID keys configured
//! - A seeded superadmin with credentials in the test environment
//!
//! Run with: cargo test -p angadi-integration-tests -- --ignored

use std::time::Duration;

use reqwest::StatusCode;
use serde_json::{Value, json};
use sqlx::PgPool;

use angadi_integration_tests::{base_url, client, superadmin_token};

async fn test_pool() -> PgPool {
    let database_url = std::env::var("ANGADI_DATABASE_URL")
        .expect("ANGADI_DATABASE_URL must be set for database-backed tests");
    PgPool::connect(&database_url).await.expect("test pool")
}

// ============================================================================
// Announcement Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_announcement_round_trip() {
    let client = client();
    let base_url = base_url();
    let token = superadmin_token(&client).await;

    let title = format!("it-announcement-{}", uuid::Uuid::new_v4().simple());
    let resp = client
        .post(format!("{base_url}/api/announcements"))
        .bearer_auth(&token)
        .json(&json!({ "title": title, "message": "integration test" }))
        .send()
        .await
        .expect("create request");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let created: Value = resp.json().await.expect("created body");
    assert_eq!(created["title"], title.as_str());
    assert_eq!(created["isActive"], true);
    let id = created["id"].as_i64().expect("created id");

    // Public list carries it without auth, newest first.
    let public: Value = client
        .get(format!("{base_url}/api/announcements"))
        .send()
        .await
        .expect("public list")
        .json()
        .await
        .expect("public list body");
    assert_eq!(public[0]["title"], title.as_str());

    // Delete is idempotent.
    for _ in 0..2 {
        let resp = client
            .delete(format!("{base_url}/api/announcements/{id}"))
            .bearer_auth(&token)
            .send()
            .await
            .expect("delete request");
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_announcement_requires_auth() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/api/announcements"))
        .json(&json!({ "title": "nope", "message": "nope" }))
        .send()
        .await
        .expect("create request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = client
        .get(format!("{base_url}/api/admin/announcements"))
        .send()
        .await
        .expect("admin list request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_announcement_rejects_blank_fields() {
    let client = client();
    let base_url = base_url();
    let token = superadmin_token(&client).await;

    let resp = client
        .post(format!("{base_url}/api/announcements"))
        .bearer_auth(&token)
        .json(&json!({ "title": "  ", "message": "body" }))
        .send()
        .await
        .expect("create request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Subscription Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_subscribe_is_idempotent() {
    let client = client();
    let base_url = base_url();
    let pool = test_pool().await;

    let endpoint = format!(
        "https://push.example.com/endpoint/{}",
        uuid::Uuid::new_v4().simple()
    );
    let body = json!({
        "endpoint": endpoint,
        "keys": { "p256dh": "BPx-test-key", "auth": "auth-secret" }
    });

    for _ in 0..3 {
        let resp = client
            .post(format!("{base_url}/api/subscribe"))
            .json(&body)
            .send()
            .await
            .expect("subscribe request");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM push_subscription WHERE endpoint = $1")
            .bind(&endpoint)
            .fetch_one(&pool)
            .await
            .expect("count query");
    assert_eq!(count, 1);

    sqlx::query("DELETE FROM push_subscription WHERE endpoint = $1")
        .bind(&endpoint)
        .execute(&pool)
        .await
        .expect("cleanup");
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_subscribe_rejects_invalid_endpoint() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/api/subscribe"))
        .json(&json!({
            "endpoint": "not a url",
            "keys": { "p256dh": "k", "auth": "a" }
        }))
        .send()
        .await
        .expect("subscribe request");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server, database, and VAPID keys"]
async fn test_dead_endpoint_is_pruned_after_fan_out() {
    let client = client();
    let base_url = base_url();
    let pool = test_pool().await;
    let token = superadmin_token(&client).await;

    // An endpoint that answers 404 counts as permanently gone.
    let endpoint = format!(
        "https://fcm.googleapis.com/fcm/send/it-dead-{}",
        uuid::Uuid::new_v4().simple()
    );
    let resp = client
        .post(format!("{base_url}/api/subscribe"))
        .json(&json!({
            "endpoint": endpoint,
            "keys": {
                "p256dh": "BNcRdreALRFXTkOOUHK1EtK2wtaz5Ry4YfYCA_0QTpQtUbVlUls0VJXg7A8u-Ts1XbjhazAkj7I99e8QcYP7DkM",
                "auth": "tBHItJI5svbpez7KI4CCXg"
            }
        }))
        .send()
        .await
        .expect("subscribe request");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .post(format!("{base_url}/api/announcements"))
        .bearer_auth(&token)
        .json(&json!({ "title": "prune test", "message": "prune test" }))
        .send()
        .await
        .expect("create request");
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = resp.json::<Value>().await.expect("body")["id"]
        .as_i64()
        .expect("id");

    // Fan-out runs in the background; poll until the row disappears.
    let mut pruned = false;
    for _ in 0..20 {
        tokio::time::sleep(Duration::from_millis(500)).await;
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM push_subscription WHERE endpoint = $1")
                .bind(&endpoint)
                .fetch_one(&pool)
                .await
                .expect("count query");
        if count == 0 {
            pruned = true;
            break;
        }
    }
    assert!(pruned, "dead endpoint should be removed by the dispatcher");

    let _ = client
        .delete(format!("{base_url}/api/announcements/{id}"))
        .bearer_auth(&token)
        .send()
        .await;
}
