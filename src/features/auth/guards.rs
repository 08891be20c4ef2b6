//! Role-based authorization guards for the staff surface.
//!
//! These guards extract the authenticated user and verify they have the
//! required roles.
//!
//! Roles:
//! - admin: investigator permissions plus rate limit administration
//! - investigator: can view cases, change status, and reply to reporters

use crate::core::error::AppError;
use crate::features::auth::model::AuthenticatedUser;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Guard for staff-level access.
///
/// Allows users with the "investigator" or "admin" role.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireStaff(user): RequireStaff) { ... }
/// ```
pub struct RequireStaff(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.has_staff_access() {
            return Err(AppError::Forbidden("Staff access required".to_string()));
        }

        Ok(RequireStaff(user.clone()))
    }
}

/// Guard for admin-only operations.
///
/// Only allows users with the "admin" role.
///
/// # Example
/// ```ignore
/// pub async fn handler(RequireAdmin(user): RequireAdmin) { ... }
/// ```
pub struct RequireAdmin(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .ok_or_else(|| AppError::Unauthorized("User not authenticated".to_string()))?;

        if !user.is_admin() {
            return Err(AppError::Forbidden("Admin access required".to_string()));
        }

        Ok(RequireAdmin(user.clone()))
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, routing::get, Router};
    use axum_test::TestServer;

    use super::*;
    use crate::shared::test_helpers::{with_admin_auth, with_investigator_auth};

    async fn staff_endpoint(RequireStaff(_user): RequireStaff) -> StatusCode {
        StatusCode::OK
    }

    async fn admin_endpoint(RequireAdmin(_user): RequireAdmin) -> StatusCode {
        StatusCode::OK
    }

    fn app() -> Router {
        Router::new()
            .route("/staff", get(staff_endpoint))
            .route("/admin", get(admin_endpoint))
    }

    #[tokio::test]
    async fn test_unauthenticated_request_is_rejected() {
        let server = TestServer::new(app()).unwrap();
        let response = server.get("/staff").await;
        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_investigator_passes_staff_guard() {
        let server = TestServer::new(with_investigator_auth(app())).unwrap();
        let response = server.get("/staff").await;
        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_investigator_fails_admin_guard() {
        let server = TestServer::new(with_investigator_auth(app())).unwrap();
        let response = server.get("/admin").await;
        response.assert_status(StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn test_admin_passes_both_guards() {
        let server = TestServer::new(with_admin_auth(app())).unwrap();
        server.get("/staff").await.assert_status(StatusCode::OK);
        server.get("/admin").await.assert_status(StatusCode::OK);
    }
}
