//! Authentication extractors for admin routes.
//!
//! Every authenticated request re-resolves the caller's identity from the
//! database instead of trusting the role and permissions baked into the
//! token. Deleting an admin or revoking a capability takes effect on their
//! very next request, even with an otherwise valid token in hand.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use angadi_core::AdminId;

use crate::db::AdminRepository;
use crate::models::Admin;
use crate::state::AppState;

/// Extractor that requires a valid bearer token.
///
/// The token only proves identity; the admin record, role, and permission
/// map are loaded fresh from the database on every request.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentAdmin(admin): CurrentAdmin,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", admin.username)
/// }
/// ```
pub struct CurrentAdmin(pub Admin);

/// Error returned when authentication fails.
pub enum AuthRejection {
    /// Missing, malformed, expired, or revoked credentials.
    Unauthorized,
    /// The identity lookup itself failed.
    Internal,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Authentication required"),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl FromRequestParts<AppState> for CurrentAdmin {
    type Rejection = AuthRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AuthRejection::Unauthorized)?;

        let verified = state
            .tokens()
            .verify(token)
            .map_err(|_| AuthRejection::Unauthorized)?;

        resolve_admin(state, verified.admin_id).await.map(Self)
    }
}

/// Extractor that requires the caller to hold the superadmin role.
///
/// The role check runs against the freshly loaded record, not the token's
/// role claim.
pub struct RequireSuperadmin(pub Admin);

/// Error returned when superadmin authorization fails.
pub enum SuperadminRejection {
    Unauthorized,
    /// Authenticated, but not a superadmin.
    Forbidden,
    Internal,
}

impl IntoResponse for SuperadminRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Authentication required"),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "Only superadmins can access this resource",
            ),
            Self::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error"),
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<AuthRejection> for SuperadminRejection {
    fn from(rejection: AuthRejection) -> Self {
        match rejection {
            AuthRejection::Unauthorized => Self::Unauthorized,
            AuthRejection::Internal => Self::Internal,
        }
    }
}

impl FromRequestParts<AppState> for RequireSuperadmin {
    type Rejection = SuperadminRejection;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentAdmin(admin) = CurrentAdmin::from_request_parts(parts, state).await?;

        if !admin.is_superadmin() {
            return Err(SuperadminRejection::Forbidden);
        }

        Ok(Self(admin))
    }
}

/// Pull the token out of an `Authorization: Bearer ...` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Load the admin record for a verified token.
///
/// A token whose subject no longer exists is indistinguishable from an
/// invalid token to the caller.
async fn resolve_admin(state: &AppState, id: AdminId) -> Result<Admin, AuthRejection> {
    let repository = AdminRepository::new(state.pool());

    match repository.get_by_id(id).await {
        Ok(Some(admin)) => Ok(admin),
        Ok(None) => Err(AuthRejection::Unauthorized),
        Err(error) => {
            tracing::error!(%error, "failed to resolve admin identity");
            Err(AuthRejection::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .header(AUTHORIZATION, value)
            .body(())
            .expect("request")
            .into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_with_auth("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_rejects_other_schemes() {
        let parts = parts_with_auth("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_bearer_token_rejects_empty_token() {
        let parts = parts_with_auth("Bearer ");
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_bearer_token_requires_header() {
        let (parts, ()) = Request::builder().body(()).expect("request").into_parts();
        assert_eq!(bearer_token(&parts), None);
    }
}
