use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::features::audit::dtos as audit_dtos;
use crate::features::cases::{
    dtos as cases_dtos, handlers as cases_handlers, models as cases_models,
};
use crate::features::communications::dtos as communications_dtos;
use crate::features::rate_limits::{dtos as rate_limits_dtos, handlers as rate_limits_handlers};
use crate::features::tracking::{dtos as tracking_dtos, handlers as tracking_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Tracking (public)
        tracking_handlers::submit_report,
        tracking_handlers::track_case,
        tracking_handlers::post_tracking_message,
        // Cases (staff)
        cases_handlers::list_cases,
        cases_handlers::get_case,
        cases_handlers::update_case_status,
        cases_handlers::assign_investigator,
        cases_handlers::update_notes,
        cases_handlers::post_staff_message,
        // Rate Limits (admin)
        rate_limits_handlers::rate_limit_config_handler::list_rate_limit_configs,
        rate_limits_handlers::rate_limit_config_handler::get_rate_limit_config,
        rate_limits_handlers::rate_limit_config_handler::update_rate_limit_config,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Case enums
            cases_models::CaseStatus,
            cases_models::TipType,
            cases_models::OrganisationType,
            cases_models::MisconductStatus,
            cases_models::CurrencyCode,
            // Tracking
            cases_dtos::SubmitCaseDto,
            cases_dtos::SubmissionReceiptDto,
            tracking_dtos::TrackCaseDto,
            tracking_dtos::TrackedCaseDto,
            tracking_dtos::WhistleblowerMessageDto,
            ApiResponse<cases_dtos::SubmissionReceiptDto>,
            ApiResponse<tracking_dtos::TrackedCaseDto>,
            // Cases
            cases_dtos::SortDirection,
            cases_dtos::CaseQueryParams,
            cases_dtos::CaseSummaryDto,
            cases_dtos::CaseDetailDto,
            cases_dtos::UpdateCaseStatusDto,
            cases_dtos::AssignInvestigatorDto,
            cases_dtos::UpdateNotesDto,
            cases_dtos::StaffMessageDto,
            ApiResponse<Vec<cases_dtos::CaseSummaryDto>>,
            ApiResponse<cases_dtos::CaseSummaryDto>,
            ApiResponse<cases_dtos::CaseDetailDto>,
            // Thread and audit trail
            communications_dtos::CommunicationDto,
            audit_dtos::AuditLogDto,
            ApiResponse<communications_dtos::CommunicationDto>,
            // Rate Limits
            rate_limits_dtos::RateLimitConfigResponseDto,
            rate_limits_dtos::UpdateRateLimitConfigDto,
            ApiResponse<Vec<rate_limits_dtos::RateLimitConfigResponseDto>>,
            ApiResponse<rate_limits_dtos::RateLimitConfigResponseDto>,
        )
    ),
    tags(
        (name = "tracking", description = "Anonymous report submission and case tracking (public)"),
        (name = "cases", description = "Case management for investigators and admins"),
        (name = "rate-limits", description = "Rate limit configuration (admin only)"),
    ),
    modifiers(&SecurityAddon),
    info(
        title = "Tipline API",
        version = "0.1.0",
        description = "API documentation for the whistleblower tipline",
    )
)]
pub struct ApiDoc;

/// Adds Bearer JWT security scheme to OpenAPI spec
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
