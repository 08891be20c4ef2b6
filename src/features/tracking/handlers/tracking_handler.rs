use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, ClientIp};
use crate::features::cases::dtos::{SubmissionReceiptDto, SubmitCaseDto};
use crate::features::cases::CaseService;
use crate::features::communications::dtos::CommunicationDto;
use crate::features::communications::CommunicationService;
use crate::features::tracking::dtos::{TrackCaseDto, TrackedCaseDto, WhistleblowerMessageDto};
use crate::features::tracking::services::TrackingService;
use crate::shared::types::ApiResponse;

/// State for the public tracking handlers
#[derive(Clone)]
pub struct TrackingState {
    pub case_service: Arc<CaseService>,
    pub tracking_service: Arc<TrackingService>,
    pub communication_service: Arc<CommunicationService>,
}

/// Submit a new whistleblower report
///
/// This is a public endpoint (no authentication required). The response is
/// the only place the access code ever appears; it cannot be recovered
/// afterwards.
#[utoipa::path(
    post,
    path = "/api/reports",
    request_body = SubmitCaseDto,
    responses(
        (status = 201, description = "Report submitted successfully", body = ApiResponse<SubmissionReceiptDto>),
        (status = 400, description = "Validation error")
    ),
    tag = "tracking"
)]
pub async fn submit_report(
    State(state): State<TrackingState>,
    AppJson(dto): AppJson<SubmitCaseDto>,
) -> Result<(StatusCode, Json<ApiResponse<SubmissionReceiptDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let case = state.case_service.create(dto).await?;
    let receipt = SubmissionReceiptDto {
        case_id: case.case_id,
        access_code: case.access_code,
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(receipt),
            Some(
                "Save your case ID and access code now. They are shown only once and cannot be recovered.".to_string(),
            ),
            None,
        )),
    ))
}

/// Track a case with its credentials
///
/// Public endpoint. Answers with the reporter-facing view of the case and
/// its message thread. Repeated failures from one client are throttled.
#[utoipa::path(
    post,
    path = "/api/track",
    request_body = TrackCaseDto,
    responses(
        (status = 200, description = "Case found", body = ApiResponse<TrackedCaseDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Invalid case ID or access code"),
        (status = 429, description = "Too many failed attempts")
    ),
    tag = "tracking"
)]
pub async fn track_case(
    State(state): State<TrackingState>,
    ClientIp(client_key): ClientIp,
    AppJson(dto): AppJson<TrackCaseDto>,
) -> Result<Json<ApiResponse<TrackedCaseDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let case = state
        .tracking_service
        .authenticate(&dto.case_id, &dto.access_code, &client_key)
        .await?;
    let communications = state
        .communication_service
        .list_for_case(case.id)
        .await?
        .into_iter()
        .map(CommunicationDto::from)
        .collect();

    let tracked = TrackedCaseDto::from_parts(case, communications);
    Ok(Json(ApiResponse::success(Some(tracked), None, None)))
}

/// Send a message to the investigators handling a case
///
/// Public endpoint guarded by the same credentials and throttle as tracking.
#[utoipa::path(
    post,
    path = "/api/track/messages",
    request_body = WhistleblowerMessageDto,
    responses(
        (status = 201, description = "Message sent successfully", body = ApiResponse<CommunicationDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Invalid case ID or access code"),
        (status = 429, description = "Too many failed attempts")
    ),
    tag = "tracking"
)]
pub async fn post_tracking_message(
    State(state): State<TrackingState>,
    ClientIp(client_key): ClientIp,
    AppJson(dto): AppJson<WhistleblowerMessageDto>,
) -> Result<(StatusCode, Json<ApiResponse<CommunicationDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let case = state
        .tracking_service
        .authenticate(&dto.case_id, &dto.access_code, &client_key)
        .await?;
    let communication = state
        .communication_service
        .append_from_whistleblower(&case, &dto.message)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(communication.into()), None, None)),
    ))
}

#[cfg(test)]
mod tests {
    use axum::Router;
    use axum_test::TestServer;
    use serde_json::{json, Value};
    use sqlx::PgPool;

    use super::*;
    use crate::features::rate_limits::{RateLimitConfigService, ThrottleService};

    // A lazy pool never opens a connection; these tests only exercise paths
    // that fail validation before any query runs.
    fn app() -> Router {
        let pool = PgPool::connect_lazy("postgres://localhost/tipline_test")
            .expect("lazy pool");
        let case_service = Arc::new(CaseService::new(pool.clone()));
        let config_service = Arc::new(RateLimitConfigService::new(pool.clone()));
        let throttle_service = Arc::new(ThrottleService::new(pool.clone(), config_service));
        let tracking_service = Arc::new(TrackingService::new(
            Arc::clone(&case_service),
            throttle_service,
        ));
        let communication_service = Arc::new(CommunicationService::new(pool));

        crate::features::tracking::routes::routes(
            case_service,
            tracking_service,
            communication_service,
        )
    }

    fn submission_body() -> Value {
        json!({
            "title": "Inflated contract award",
            "tip_type": "procurement_fraud",
            "organisation_type": "ministry",
            "misconduct_ongoing": "yes",
            "organisation_name": "Ministry of Works",
            "incident_date": "2025-03-14",
            "description_of_tip": "Contract awarded far above market rate."
        })
    }

    #[tokio::test]
    async fn test_submission_with_empty_title_is_rejected() {
        let server = TestServer::new(app()).unwrap();
        let mut body = submission_body();
        body["title"] = json!("");

        let response = server.post("/api/reports").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);

        let envelope: Value = response.json();
        assert_eq!(envelope["success"], false);
        assert!(envelope["errors"].is_array());
    }

    #[tokio::test]
    async fn test_submission_with_missing_fields_is_rejected() {
        let server = TestServer::new(app()).unwrap();
        let response = server
            .post("/api/reports")
            .json(&json!({ "title": "No details" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let envelope: Value = response.json();
        assert_eq!(envelope["success"], false);
    }

    #[tokio::test]
    async fn test_malformed_tracking_credentials_use_the_generic_message() {
        let server = TestServer::new(app()).unwrap();
        let response = server
            .post("/api/track")
            .json(&json!({ "case_id": "bogus", "access_code": "bogus" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let envelope: Value = response.json();
        assert_eq!(envelope["success"], false);
        assert!(envelope["message"]
            .as_str()
            .unwrap()
            .contains("Invalid case ID or access code"));
    }

    #[tokio::test]
    async fn test_empty_tracking_message_is_rejected() {
        let server = TestServer::new(app()).unwrap();
        let response = server
            .post("/api/track/messages")
            .json(&json!({
                "case_id": "WB2025000417",
                "access_code": "A7KQ20ZX",
                "message": ""
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
