use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::features::audit::dtos::AuditLogDto;
use crate::features::cases::models::{
    Case, CaseStatus, CurrencyCode, MisconductStatus, OrganisationType, TipType,
};
use crate::features::communications::dtos::CommunicationDto;
use crate::shared::constants::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

// Sort direction
#[derive(Debug, Clone, Copy, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

// Helper functions for defaults
fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    DEFAULT_PAGE_SIZE
}

/// Request DTO for submitting a new report
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitCaseDto {
    /// Short title of the report
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Category of the reported misconduct
    pub tip_type: TipType,

    /// Kind of organisation the report concerns
    pub organisation_type: OrganisationType,

    /// Whether the misconduct is still ongoing
    pub misconduct_ongoing: MisconductStatus,

    /// Name of the organisation
    #[validate(length(
        min = 1,
        max = 200,
        message = "Organisation name must be 1-200 characters"
    ))]
    pub organisation_name: String,

    /// Date the incident occurred
    pub incident_date: NaiveDate,

    /// Persons involved, if known
    #[validate(length(max = 5000, message = "Persons involved must not exceed 5000 characters"))]
    pub persons_involved: Option<String>,

    /// Monetary amount involved, if known
    #[schema(value_type = Option<String>, example = "1250000.00")]
    pub amount_involved: Option<Decimal>,

    /// Currency of the amount (defaults to NGN)
    pub amount_currency: Option<CurrencyCode>,

    /// Branch address of the organisation
    #[validate(length(max = 1000, message = "Branch address must not exceed 1000 characters"))]
    pub branch_address: Option<String>,

    /// Full narrative of the tip (required)
    #[validate(length(
        min = 1,
        max = 10000,
        message = "Description must be 1-10000 characters"
    ))]
    pub description_of_tip: String,

    /// Other agency this tip was also submitted to, if any
    #[validate(length(max = 200, message = "Agency name must not exceed 200 characters"))]
    pub other_agency_name: Option<String>,

    /// Date the tip was submitted to the other agency
    pub other_agency_date: Option<NaiveDate>,

    /// Optional reporter surname
    #[validate(length(max = 100, message = "Surname must not exceed 100 characters"))]
    pub reporter_surname: Option<String>,

    /// Optional reporter first name
    #[validate(length(max = 100, message = "First name must not exceed 100 characters"))]
    pub reporter_firstname: Option<String>,

    /// Optional reporter phone number
    #[validate(length(max = 20, message = "Phone number must not exceed 20 characters"))]
    pub reporter_phone: Option<String>,

    /// Optional reporter email for follow-up
    #[validate(email(message = "Invalid email format"))]
    pub reporter_email: Option<String>,

    /// Optional reporter postal address
    #[validate(length(max = 500, message = "Address must not exceed 500 characters"))]
    pub reporter_address: Option<String>,

    /// Opaque reference to externally stored evidence
    #[validate(length(max = 500, message = "Evidence reference must not exceed 500 characters"))]
    pub evidence_file: Option<String>,
}

/// One-time receipt returned after submission.
/// The only response in the API that carries the access code.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubmissionReceiptDto {
    pub case_id: String,
    pub access_code: String,
}

/// Summary row for the staff case list
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CaseSummaryDto {
    pub id: Uuid,
    pub case_id: String,
    pub title: String,
    pub tip_type: TipType,
    pub organisation_type: OrganisationType,
    pub organisation_name: String,
    pub status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_investigator: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Case> for CaseSummaryDto {
    fn from(c: Case) -> Self {
        Self {
            id: c.id,
            case_id: c.case_id,
            title: c.title,
            tip_type: c.tip_type,
            organisation_type: c.organisation_type,
            organisation_name: c.organisation_name,
            status: c.status,
            assigned_investigator: c.assigned_investigator,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

/// Full staff view of a case, including the communication thread and audit
/// trail. Never carries the access code.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CaseDetailDto {
    pub id: Uuid,
    pub case_id: String,
    pub title: String,
    pub tip_type: TipType,
    pub organisation_type: OrganisationType,
    pub misconduct_ongoing: MisconductStatus,
    pub organisation_name: String,
    pub incident_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persons_involved: Option<String>,
    #[schema(value_type = Option<String>, example = "1250000.00")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_involved: Option<Decimal>,
    pub amount_currency: CurrencyCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_address: Option<String>,
    pub description_of_tip: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_agency_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_agency_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_surname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_firstname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_file: Option<String>,
    pub status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_investigator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investigation_notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub communications: Vec<CommunicationDto>,
    pub audit_trail: Vec<AuditLogDto>,
}

impl CaseDetailDto {
    pub fn from_parts(
        c: Case,
        communications: Vec<CommunicationDto>,
        audit_trail: Vec<AuditLogDto>,
    ) -> Self {
        Self {
            id: c.id,
            case_id: c.case_id,
            title: c.title,
            tip_type: c.tip_type,
            organisation_type: c.organisation_type,
            misconduct_ongoing: c.misconduct_ongoing,
            organisation_name: c.organisation_name,
            incident_date: c.incident_date,
            persons_involved: c.persons_involved,
            amount_involved: c.amount_involved,
            amount_currency: c.amount_currency,
            branch_address: c.branch_address,
            description_of_tip: c.description_of_tip,
            other_agency_name: c.other_agency_name,
            other_agency_date: c.other_agency_date,
            reporter_surname: c.reporter_surname,
            reporter_firstname: c.reporter_firstname,
            reporter_phone: c.reporter_phone,
            reporter_email: c.reporter_email,
            reporter_address: c.reporter_address,
            evidence_file: c.evidence_file,
            status: c.status,
            assigned_investigator: c.assigned_investigator,
            investigation_notes: c.investigation_notes,
            resolution_summary: c.resolution_summary,
            closed_at: c.closed_at,
            created_at: c.created_at,
            updated_at: c.updated_at,
            communications,
            audit_trail,
        }
    }
}

/// Request DTO for changing the status of a case
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateCaseStatusDto {
    /// New status for the case
    pub status: CaseStatus,

    /// Resolution summary, required when closing a case
    #[validate(length(
        max = 10000,
        message = "Resolution summary must not exceed 10000 characters"
    ))]
    pub resolution_summary: Option<String>,
}

/// Request DTO for assigning an investigator to a case
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AssignInvestigatorDto {
    /// Staff subject identifier of the investigator
    #[validate(length(min = 1, max = 100, message = "Investigator must be 1-100 characters"))]
    pub investigator: String,
}

/// Request DTO for updating investigation notes
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateNotesDto {
    /// Internal notes, visible to staff only
    #[validate(length(max = 10000, message = "Notes must not exceed 10000 characters"))]
    pub investigation_notes: String,
}

/// Request DTO for an investigator reply on a case thread
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct StaffMessageDto {
    /// Message text sent to the reporter
    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
}

// Query params for listing cases
#[derive(Debug, Clone, Deserialize, IntoParams, ToSchema)]
pub struct CaseQueryParams {
    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    #[param(minimum = 1)]
    pub page: i64,

    /// Items per page
    #[serde(default = "default_page_size")]
    #[param(minimum = 1, maximum = 100)]
    pub page_size: i64,

    /// Search in case_id, title, or organisation name
    pub search: Option<String>,

    /// Filter by status
    pub status: Option<CaseStatus>,

    /// Filter by tip type
    pub tip_type: Option<TipType>,

    /// Sort direction by creation time (default: desc)
    #[serde(default)]
    pub sort: SortDirection,
}

impl CaseQueryParams {
    pub fn offset(&self) -> i64 {
        (self.page.max(1) - 1) * self.limit()
    }

    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, MAX_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_case() -> Case {
        let now = Utc::now();
        Case {
            id: Uuid::new_v4(),
            case_id: "WB2025000417".to_string(),
            access_code: "A7KQ20ZX".to_string(),
            title: "Inflated contract award".to_string(),
            tip_type: TipType::ProcurementFraud,
            organisation_type: OrganisationType::Ministry,
            misconduct_ongoing: MisconductStatus::Yes,
            organisation_name: "Ministry of Works".to_string(),
            incident_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            persons_involved: None,
            amount_involved: None,
            amount_currency: CurrencyCode::Ngn,
            branch_address: None,
            description_of_tip: "Contract awarded far above market rate.".to_string(),
            other_agency_name: None,
            other_agency_date: None,
            reporter_surname: None,
            reporter_firstname: None,
            reporter_phone: None,
            reporter_email: None,
            reporter_address: None,
            evidence_file: None,
            status: CaseStatus::UnderReview,
            assigned_investigator: Some("staff-onyeka".to_string()),
            investigation_notes: Some("Interview scheduled".to_string()),
            resolution_summary: None,
            closed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn valid_submission() -> SubmitCaseDto {
        SubmitCaseDto {
            title: "Inflated contract award".to_string(),
            tip_type: TipType::ProcurementFraud,
            organisation_type: OrganisationType::Ministry,
            misconduct_ongoing: MisconductStatus::Yes,
            organisation_name: "Ministry of Works".to_string(),
            incident_date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            persons_involved: Some("Director of procurement".to_string()),
            amount_involved: Some(Decimal::new(1_250_000_00, 2)),
            amount_currency: Some(CurrencyCode::Ngn),
            branch_address: None,
            description_of_tip: "Contract awarded far above market rate.".to_string(),
            other_agency_name: None,
            other_agency_date: None,
            reporter_surname: None,
            reporter_firstname: None,
            reporter_phone: None,
            reporter_email: None,
            reporter_address: None,
            evidence_file: None,
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(valid_submission().validate().is_ok());
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut dto = valid_submission();
        dto.title = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_overlong_title_rejected() {
        let mut dto = valid_submission();
        dto.title = "x".repeat(201);
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_empty_description_rejected() {
        let mut dto = valid_submission();
        dto.description_of_tip = String::new();
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut dto = valid_submission();
        dto.reporter_email = Some("not-an-email".to_string());
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_missing_email_allowed() {
        let mut dto = valid_submission();
        dto.reporter_email = None;
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_generated_reporter_contact_accepted() {
        use fake::faker::internet::en::SafeEmail;
        use fake::faker::name::en::{FirstName, LastName};
        use fake::Fake;

        for _ in 0..20 {
            let mut dto = valid_submission();
            dto.reporter_firstname = Some(FirstName().fake());
            dto.reporter_surname = Some(LastName().fake());
            dto.reporter_email = Some(SafeEmail().fake());
            assert!(dto.validate().is_ok());
        }
    }

    #[test]
    fn test_staff_views_never_carry_the_access_code() {
        let summary = serde_json::to_value(CaseSummaryDto::from(stored_case())).unwrap();
        assert!(summary.get("access_code").is_none());
        assert_eq!(summary["case_id"], "WB2025000417");

        let detail =
            serde_json::to_value(CaseDetailDto::from_parts(stored_case(), Vec::new(), Vec::new()))
                .unwrap();
        assert!(detail.get("access_code").is_none());
        assert_eq!(detail["assigned_investigator"], "staff-onyeka");
    }

    #[test]
    fn test_receipt_serializes_both_credentials() {
        let receipt = SubmissionReceiptDto {
            case_id: "WB2025000417".to_string(),
            access_code: "A7KQ20ZX".to_string(),
        };
        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["case_id"], "WB2025000417");
        assert_eq!(json["access_code"], "A7KQ20ZX");
    }

    #[test]
    fn test_query_params_offset_and_limit() {
        let params = CaseQueryParams {
            page: 3,
            page_size: 25,
            search: None,
            status: None,
            tip_type: None,
            sort: SortDirection::Desc,
        };
        assert_eq!(params.limit(), 25);
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_query_params_clamp_page_size() {
        let params = CaseQueryParams {
            page: 1,
            page_size: 500,
            search: None,
            status: None,
            tip_type: None,
            sort: SortDirection::Asc,
        };
        assert_eq!(params.limit(), 100);
    }
}
