use std::sync::Arc;

use axum::{routing::post, Router};

use crate::features::cases::CaseService;
use crate::features::communications::CommunicationService;
use crate::features::tracking::handlers::{self, TrackingState};
use crate::features::tracking::services::TrackingService;

/// Create routes for the public tracking feature
///
/// Note: These endpoints are public (no authentication required); they are
/// the whole surface an anonymous reporter ever touches.
pub fn routes(
    case_service: Arc<CaseService>,
    tracking_service: Arc<TrackingService>,
    communication_service: Arc<CommunicationService>,
) -> Router {
    let state = TrackingState {
        case_service,
        tracking_service,
        communication_service,
    };

    Router::new()
        .route("/api/reports", post(handlers::submit_report))
        .route("/api/track", post(handlers::track_case))
        .route("/api/track/messages", post(handlers::post_tracking_message))
        .with_state(state)
}
