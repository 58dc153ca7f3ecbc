//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                         - Liveness check
//! GET  /health/ready                   - Readiness check (DB ping)
//!
//! # Auth
//! POST /api/login                      - Login, returns bearer token
//!
//! # Admin management (superadmin only)
//! POST   /api/admin/create             - Create an admin
//! GET    /api/admin/list               - List admin-role records
//! PATCH  /api/admin/{id}/permissions   - Replace an admin's permission map
//! PUT    /api/admin/{id}               - Partial update (username/password/permissions)
//! DELETE /api/admin/{id}               - Delete an admin
//!
//! # Announcements
//! GET    /api/announcements            - Active announcements (public)
//! GET    /api/admin/announcements      - All announcements (capability: announcements)
//! POST   /api/announcements            - Create + push fan-out (capability: announcements)
//! DELETE /api/announcements/{id}       - Delete (capability: announcements)
//!
//! # Push subscriptions
//! POST /api/subscribe                  - Register a push subscription (public, idempotent)
//!
//! # Products
//! GET    /api/products                 - List products (public)
//! POST   /api/products                 - Create (capability: products)
//! PUT    /api/products/{id}            - Update (capability: products)
//! DELETE /api/products/{id}            - Delete (capability: products)
//!
//! # Interests
//! POST /api/interests                  - Capture a lead (public)
//! GET  /api/interests                  - List leads (capability: interests)
//!
//! # Traffic
//! POST /api/traffic/visit              - Record a visit (public)
//! GET  /api/traffic                    - Per-day counters (capability: traffic)
//! ```

pub mod admins;
pub mod announcements;
pub mod auth;
pub mod health;
pub mod interests;
pub mod products;
pub mod subscribe;
pub mod traffic;

use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use angadi_core::Capability;

use crate::error::{AppError, Result};
use crate::models::Admin;
use crate::state::AppState;

/// Reject with 403 unless the admin holds the capability.
///
/// Superadmins pass every check; for everyone else an absent capability
/// key means granted (deny-list polarity).
pub(crate) fn require_capability(admin: &Admin, capability: Capability) -> Result<()> {
    if admin.can(capability) {
        Ok(())
    } else {
        tracing::debug!(
            admin = %admin.username,
            %capability,
            "capability denied"
        );
        Err(AppError::Forbidden)
    }
}

/// Create the admin-management routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(admins::create))
        .route("/list", get(admins::list))
        .route("/{id}/permissions", patch(admins::replace_permissions))
        .route("/{id}", put(admins::update).delete(admins::delete))
}

/// Create all API routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .nest("/admin", admin_routes())
        .route(
            "/announcements",
            get(announcements::list_public).post(announcements::create),
        )
        .route("/announcements/{id}", delete(announcements::delete))
        .route("/admin/announcements", get(announcements::list_all))
        .route("/subscribe", post(subscribe::register))
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/{id}",
            put(products::update).delete(products::delete),
        )
        .route(
            "/interests",
            get(interests::list).post(interests::create),
        )
        .route("/traffic", get(traffic::list))
        .route("/traffic/visit", post(traffic::record_visit))
}

/// Create the full router, health endpoints included.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header::AUTHORIZATION};
    use secrecy::SecretString;
    use sqlx::postgres::PgPoolOptions;
    use tower::ServiceExt;

    use crate::config::ServerConfig;

    /// State over a lazy pool: nothing here touches the database, so the
    /// connection is never actually opened.
    fn test_app() -> Router {
        let config = ServerConfig {
            database_url: SecretString::from("postgres://localhost/unused".to_owned()),
            host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
            port: 0,
            token_secret: SecretString::from("kV8kortP2x1kuGYgXfLnnYBW3v0Jb1qQ".to_owned()),
            push: None,
            notification_icon: "/icon.png".to_owned(),
            sentry_dsn: None,
            sentry_environment: None,
        };
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .expect("lazy pool");
        let state = AppState::new(config, pool).expect("state");

        routes().with_state(state)
    }

    #[tokio::test]
    async fn test_liveness_needs_no_database() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_protected_routes_reject_missing_token() {
        for uri in ["/api/admin/list", "/api/admin/announcements", "/api/traffic"] {
            let response = test_app()
                .oneshot(
                    Request::builder()
                        .uri(uri)
                        .body(Body::empty())
                        .expect("request"),
                )
                .await
                .expect("response");

            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
        }
    }

    #[tokio::test]
    async fn test_protected_routes_reject_garbage_token() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/admin/list")
                    .header(AUTHORIZATION, "Bearer not-a-token")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
