//! Integration tests for Angadi.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p angadi-cli -- migrate
//! cargo run -p angadi-cli -- seed --password <password>
//!
//! # Start the server
//! cargo run -p angadi-server
//!
//! # Run integration tests
//! cargo test -p angadi-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `ANGADI_BASE_URL` - Server base URL (default `http://localhost:5000`)
//! - `ANGADI_TEST_SUPERADMIN_USERNAME` - Seeded superadmin (default `superadmin`)
//! - `ANGADI_TEST_SUPERADMIN_PASSWORD` - Seeded superadmin password
//! - `ANGADI_DATABASE_URL` - Only needed by tests that inspect tables directly

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("ANGADI_BASE_URL").unwrap_or_else(|_| "http://localhost:5000".to_owned())
}

/// Plain HTTP client; auth is carried per-request as a bearer header.
#[must_use]
pub fn client() -> Client {
    Client::new()
}

/// Log in and return the bearer token.
///
/// # Panics
///
/// Panics if the request fails or the response carries no token; every
/// caller needs a working session before it can test anything else.
pub async fn login(client: &Client, username: &str, password: &str) -> String {
    let base_url = base_url();
    let resp = client
        .post(format!("{base_url}/api/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("login request failed");

    assert!(
        resp.status().is_success(),
        "login failed for {username}: {}",
        resp.status()
    );

    let body: Value = resp.json().await.expect("login response body");
    body["token"]
        .as_str()
        .expect("login response contains token")
        .to_owned()
}

/// Log in as the seeded superadmin using the test environment credentials.
pub async fn superadmin_token(client: &Client) -> String {
    let username = std::env::var("ANGADI_TEST_SUPERADMIN_USERNAME")
        .unwrap_or_else(|_| "superadmin".to_owned());
    let password = std::env::var("ANGADI_TEST_SUPERADMIN_PASSWORD")
        .expect("ANGADI_TEST_SUPERADMIN_PASSWORD must be set for integration tests");

    login(client, &username, &password).await
}

/// Create a throwaway admin and return `(username, password, token)`.
///
/// # Panics
///
/// Panics if creation or login fails.
pub async fn create_test_admin(client: &Client, superadmin_token: &str) -> (String, String, String) {
    let base_url = base_url();
    let username = format!("it-{}", uuid::Uuid::new_v4().simple());
    let password = format!("pw-{}", uuid::Uuid::new_v4().simple());

    let resp = client
        .post(format!("{base_url}/api/admin/create"))
        .bearer_auth(superadmin_token)
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("create admin request failed");
    assert_eq!(resp.status(), reqwest::StatusCode::CREATED);

    let token = login(client, &username, &password).await;
    (username, password, token)
}

/// Delete an admin by id, ignoring failures (cleanup helper).
pub async fn delete_admin(client: &Client, superadmin_token: &str, id: i64) {
    let base_url = base_url();
    let _ = client
        .delete(format!("{base_url}/api/admin/{id}"))
        .bearer_auth(superadmin_token)
        .send()
        .await;
}

/// Look up an admin's id in a `GET /api/admin/list` response body.
#[must_use]
pub fn find_admin_id(list: &Value, username: &str) -> Option<i64> {
    list.as_array()?
        .iter()
        .find(|admin| admin["username"] == username)
        .and_then(|admin| admin["id"].as_i64())
}
