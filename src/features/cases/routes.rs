use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::features::audit::AuditService;
use crate::features::cases::handlers::{self, CaseState};
use crate::features::cases::services::{CaseService, LifecycleService};
use crate::features::communications::CommunicationService;

/// Create staff routes for case management
///
/// Note: This feature requires authentication; callers apply the auth
/// middleware on top of these routes.
pub fn routes(
    case_service: Arc<CaseService>,
    lifecycle_service: Arc<LifecycleService>,
    communication_service: Arc<CommunicationService>,
    audit_service: Arc<AuditService>,
) -> Router {
    let state = CaseState {
        case_service,
        lifecycle_service,
        communication_service,
        audit_service,
    };

    Router::new()
        .route("/api/cases", get(handlers::list_cases))
        .route("/api/cases/{id}", get(handlers::get_case))
        .route("/api/cases/{id}/status", patch(handlers::update_case_status))
        .route("/api/cases/{id}/assign", patch(handlers::assign_investigator))
        .route("/api/cases/{id}/notes", patch(handlers::update_notes))
        .route("/api/cases/{id}/messages", post(handlers::post_staff_message))
        .with_state(state)
}
