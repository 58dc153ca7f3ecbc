//! Integration tests for admin authentication and permissions.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p angadi-server)
//! - A seeded superadmin with credentials in the test environment
//!
//! Run with: cargo test -p angadi-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};

use angadi_integration_tests::{
    base_url, client, create_test_admin, delete_admin, find_admin_id, login, superadmin_token,
};

// ============================================================================
// Login Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_rejects_wrong_password_generically() {
    let client = client();
    let base_url = base_url();
    let token = superadmin_token(&client).await;
    let (username, _password, _token) = create_test_admin(&client, &token).await;

    // Wrong password and unknown username must be indistinguishable.
    let wrong_password = client
        .post(format!("{base_url}/api/login"))
        .json(&json!({ "username": username, "password": "definitely-wrong" }))
        .send()
        .await
        .expect("login request");
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body: Value = wrong_password.json().await.expect("body");

    let unknown_user = client
        .post(format!("{base_url}/api/login"))
        .json(&json!({ "username": "no-such-user", "password": "definitely-wrong" }))
        .send()
        .await
        .expect("login request");
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let unknown_user_body: Value = unknown_user.json().await.expect("body");

    assert_eq!(wrong_password_body, unknown_user_body);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_login_response_shape() {
    let client = client();
    let token = superadmin_token(&client).await;
    let (username, password, _token) = create_test_admin(&client, &token).await;

    let base_url = base_url();
    let resp = client
        .post(format!("{base_url}/api/login"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .expect("login request");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("body");
    assert_eq!(body["username"], username);
    assert_eq!(body["role"], "admin");
    assert!(body["permissions"].is_object());
    assert!(body["token"].is_string());
    assert!(body.get("passwordHash").is_none());
}

// ============================================================================
// Capability Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_fresh_admin_has_default_allow_permissions() {
    let client = client();
    let base_url = base_url();
    let super_token = superadmin_token(&client).await;
    let (_username, _password, admin_token) = create_test_admin(&client, &super_token).await;

    // Empty permission map: every capability granted.
    let resp = client
        .get(format!("{base_url}/api/interests"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("interests request");
    assert_eq!(resp.status(), StatusCode::OK);

    // But superadmin-only surface stays closed.
    let resp = client
        .get(format!("{base_url}/api/admin/list"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("admin list request");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_revoked_capability_applies_to_existing_token() {
    let client = client();
    let base_url = base_url();
    let super_token = superadmin_token(&client).await;
    let (username, _password, admin_token) = create_test_admin(&client, &super_token).await;

    // Token works before the revocation.
    let resp = client
        .get(format!("{base_url}/api/traffic"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("traffic request");
    assert_eq!(resp.status(), StatusCode::OK);

    let list: Value = client
        .get(format!("{base_url}/api/admin/list"))
        .bearer_auth(&super_token)
        .send()
        .await
        .expect("admin list")
        .json()
        .await
        .expect("admin list body");
    let id = find_admin_id(&list, &username).expect("created admin is listed");

    // Revoke traffic for the admin; their token is untouched.
    let resp = client
        .patch(format!("{base_url}/api/admin/{id}/permissions"))
        .bearer_auth(&super_token)
        .json(&json!({ "permissions": { "traffic": false } }))
        .send()
        .await
        .expect("permissions request");
    assert_eq!(resp.status(), StatusCode::OK);

    // The very next request with the old token is denied.
    let resp = client
        .get(format!("{base_url}/api/traffic"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("traffic request");
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Other capabilities are unaffected.
    let resp = client
        .get(format!("{base_url}/api/interests"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("interests request");
    assert_eq!(resp.status(), StatusCode::OK);

    delete_admin(&client, &super_token, id).await;
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_deleted_admin_token_stops_working() {
    let client = client();
    let base_url = base_url();
    let super_token = superadmin_token(&client).await;
    let (username, _password, admin_token) = create_test_admin(&client, &super_token).await;

    let list: Value = client
        .get(format!("{base_url}/api/admin/list"))
        .bearer_auth(&super_token)
        .send()
        .await
        .expect("admin list")
        .json()
        .await
        .expect("admin list body");
    let id = find_admin_id(&list, &username).expect("created admin is listed");

    delete_admin(&client, &super_token, id).await;

    // Identity no longer resolves; valid signature does not matter.
    let resp = client
        .get(format!("{base_url}/api/interests"))
        .bearer_auth(&admin_token)
        .send()
        .await
        .expect("interests request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Admin Management Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_duplicate_username_conflicts() {
    let client = client();
    let base_url = base_url();
    let super_token = superadmin_token(&client).await;
    let (username, _password, _token) = create_test_admin(&client, &super_token).await;

    let resp = client
        .post(format!("{base_url}/api/admin/create"))
        .bearer_auth(&super_token)
        .json(&json!({ "username": username, "password": "another-password" }))
        .send()
        .await
        .expect("create request");
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_admin_update_changes_password() {
    let client = client();
    let base_url = base_url();
    let super_token = superadmin_token(&client).await;
    let (username, old_password, _token) = create_test_admin(&client, &super_token).await;

    let list: Value = client
        .get(format!("{base_url}/api/admin/list"))
        .bearer_auth(&super_token)
        .send()
        .await
        .expect("admin list")
        .json()
        .await
        .expect("admin list body");
    let id = find_admin_id(&list, &username).expect("created admin is listed");

    let new_password = "rotated-password-1";
    let resp = client
        .put(format!("{base_url}/api/admin/{id}"))
        .bearer_auth(&super_token)
        .json(&json!({ "password": new_password }))
        .send()
        .await
        .expect("update request");
    assert_eq!(resp.status(), StatusCode::OK);

    // Old password dead, new one works.
    let resp = client
        .post(format!("{base_url}/api/login"))
        .json(&json!({ "username": username, "password": old_password }))
        .send()
        .await
        .expect("login request");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    login(&client, &username, new_password).await;

    delete_admin(&client, &super_token, id).await;
}
