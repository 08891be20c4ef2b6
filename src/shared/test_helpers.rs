#[cfg(test)]
use crate::features::auth::model::AuthenticatedUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
pub fn create_investigator_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-investigator-sub".to_string(),
        name: Some("Test Investigator".to_string()),
        roles: vec!["investigator".to_string()],
    }
}

#[cfg(test)]
pub fn create_admin_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "test-admin-sub".to_string(),
        name: Some("Test Admin".to_string()),
        roles: vec!["admin".to_string()],
    }
}

#[cfg(test)]
async fn inject_investigator_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_investigator_user());
    next.run(request).await
}

#[cfg(test)]
async fn inject_admin_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_admin_user());
    next.run(request).await
}

#[cfg(test)]
pub fn with_investigator_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_investigator_middleware))
}

#[cfg(test)]
pub fn with_admin_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_admin_middleware))
}
