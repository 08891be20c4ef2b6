use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::audit::dtos::AuditLogDto;
use crate::features::audit::AuditService;
use crate::features::auth::guards::RequireStaff;
use crate::features::cases::dtos::{
    AssignInvestigatorDto, CaseDetailDto, CaseQueryParams, CaseSummaryDto, StaffMessageDto,
    UpdateCaseStatusDto, UpdateNotesDto,
};
use crate::features::cases::services::{CaseService, LifecycleService};
use crate::features::communications::dtos::CommunicationDto;
use crate::features::communications::CommunicationService;
use crate::shared::types::{ApiResponse, Meta};

/// State for staff case handlers
#[derive(Clone)]
pub struct CaseState {
    pub case_service: Arc<CaseService>,
    pub lifecycle_service: Arc<LifecycleService>,
    pub communication_service: Arc<CommunicationService>,
    pub audit_service: Arc<AuditService>,
}

/// List cases with filters and pagination (staff only)
#[utoipa::path(
    get,
    path = "/api/cases",
    params(CaseQueryParams),
    responses(
        (status = 200, description = "Cases retrieved successfully", body = ApiResponse<Vec<CaseSummaryDto>>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - staff only")
    ),
    tag = "cases",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn list_cases(
    RequireStaff(_user): RequireStaff,
    State(state): State<CaseState>,
    Query(params): Query<CaseQueryParams>,
) -> Result<Json<ApiResponse<Vec<CaseSummaryDto>>>> {
    let (cases, total) = state.case_service.list(&params).await?;
    let dtos: Vec<CaseSummaryDto> = cases.into_iter().map(CaseSummaryDto::from).collect();
    Ok(Json(ApiResponse::success(
        Some(dtos),
        None,
        Some(Meta { total }),
    )))
}

/// Get full case detail with thread and audit trail (staff only)
#[utoipa::path(
    get,
    path = "/api/cases/{id}",
    params(
        ("id" = Uuid, Path, description = "Case ID")
    ),
    responses(
        (status = 200, description = "Case retrieved successfully", body = ApiResponse<CaseDetailDto>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - staff only"),
        (status = 404, description = "Case not found")
    ),
    tag = "cases",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn get_case(
    RequireStaff(_user): RequireStaff,
    State(state): State<CaseState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CaseDetailDto>>> {
    let case = state.case_service.get_by_id(id).await?;
    let communications = state
        .communication_service
        .list_for_case(case.id)
        .await?
        .into_iter()
        .map(CommunicationDto::from)
        .collect();
    let audit_trail = state
        .audit_service
        .list_for_case(case.id)
        .await?
        .into_iter()
        .map(AuditLogDto::from)
        .collect();

    let dto = CaseDetailDto::from_parts(case, communications, audit_trail);
    Ok(Json(ApiResponse::success(Some(dto), None, None)))
}

/// Change the status of a case (staff only)
#[utoipa::path(
    patch,
    path = "/api/cases/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Case ID")
    ),
    request_body = UpdateCaseStatusDto,
    responses(
        (status = 200, description = "Status updated successfully", body = ApiResponse<CaseSummaryDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - staff only"),
        (status = 404, description = "Case not found")
    ),
    tag = "cases",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_case_status(
    RequireStaff(user): RequireStaff,
    State(state): State<CaseState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateCaseStatusDto>,
) -> Result<Json<ApiResponse<CaseSummaryDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let case = state
        .lifecycle_service
        .update_status(
            id,
            dto.status,
            dto.resolution_summary.as_deref(),
            user.display_name(),
        )
        .await?;
    Ok(Json(ApiResponse::success(Some(case.into()), None, None)))
}

/// Assign an investigator to a case (staff only)
#[utoipa::path(
    patch,
    path = "/api/cases/{id}/assign",
    params(
        ("id" = Uuid, Path, description = "Case ID")
    ),
    request_body = AssignInvestigatorDto,
    responses(
        (status = 200, description = "Investigator assigned successfully", body = ApiResponse<CaseSummaryDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - staff only"),
        (status = 404, description = "Case not found")
    ),
    tag = "cases",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn assign_investigator(
    RequireStaff(_user): RequireStaff,
    State(state): State<CaseState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<AssignInvestigatorDto>,
) -> Result<Json<ApiResponse<CaseSummaryDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let case = state
        .case_service
        .assign_investigator(id, &dto.investigator)
        .await?;
    Ok(Json(ApiResponse::success(Some(case.into()), None, None)))
}

/// Update internal investigation notes (staff only)
#[utoipa::path(
    patch,
    path = "/api/cases/{id}/notes",
    params(
        ("id" = Uuid, Path, description = "Case ID")
    ),
    request_body = UpdateNotesDto,
    responses(
        (status = 200, description = "Notes updated successfully", body = ApiResponse<CaseSummaryDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - staff only"),
        (status = 404, description = "Case not found")
    ),
    tag = "cases",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn update_notes(
    RequireStaff(_user): RequireStaff,
    State(state): State<CaseState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<UpdateNotesDto>,
) -> Result<Json<ApiResponse<CaseSummaryDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let case = state
        .case_service
        .update_notes(id, &dto.investigation_notes)
        .await?;
    Ok(Json(ApiResponse::success(Some(case.into()), None, None)))
}

/// Post an investigator reply on the case thread (staff only)
#[utoipa::path(
    post,
    path = "/api/cases/{id}/messages",
    params(
        ("id" = Uuid, Path, description = "Case ID")
    ),
    request_body = StaffMessageDto,
    responses(
        (status = 201, description = "Message posted successfully", body = ApiResponse<CommunicationDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden - staff only"),
        (status = 404, description = "Case not found")
    ),
    tag = "cases",
    security(
        ("bearer_auth" = [])
    )
)]
pub async fn post_staff_message(
    RequireStaff(user): RequireStaff,
    State(state): State<CaseState>,
    Path(id): Path<Uuid>,
    AppJson(dto): AppJson<StaffMessageDto>,
) -> Result<(StatusCode, Json<ApiResponse<CommunicationDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let case = state.case_service.get_by_id(id).await?;
    let communication = state
        .communication_service
        .append_from_investigator(&case, &dto.message, user.display_name())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(communication.into()), None, None)),
    ))
}
