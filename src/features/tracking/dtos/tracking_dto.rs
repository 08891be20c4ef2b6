use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::cases::models::{Case, CaseStatus};
use crate::features::communications::dtos::CommunicationDto;
use crate::shared::validation::{ACCESS_CODE_REGEX, CASE_ID_REGEX};

/// Request DTO for tracking a case with its two credentials.
///
/// Both format failures and lookup failures answer with the same generic
/// message, so a caller learns nothing about which identifiers exist.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct TrackCaseDto {
    /// Public case identifier from the submission receipt
    #[validate(regex(path = *CASE_ID_REGEX, message = "Invalid case ID or access code"))]
    #[schema(example = "WB2025000417")]
    pub case_id: String,

    /// Access code from the submission receipt
    #[validate(regex(path = *ACCESS_CODE_REGEX, message = "Invalid case ID or access code"))]
    #[schema(example = "A7KQ20ZX")]
    pub access_code: String,
}

/// Request DTO for a reporter message on the case thread
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct WhistleblowerMessageDto {
    /// Public case identifier from the submission receipt
    #[validate(regex(path = *CASE_ID_REGEX, message = "Invalid case ID or access code"))]
    #[schema(example = "WB2025000417")]
    pub case_id: String,

    /// Access code from the submission receipt
    #[validate(regex(path = *ACCESS_CODE_REGEX, message = "Invalid case ID or access code"))]
    #[schema(example = "A7KQ20ZX")]
    pub access_code: String,

    /// Message text for the investigators
    #[validate(length(min = 1, max = 5000, message = "Message must be 1-5000 characters"))]
    pub message: String,
}

/// Reporter-facing view of a tracked case.
///
/// Deliberately narrow: status and resolution only, plus the message
/// thread. No reporter contact details, no investigation notes, and never
/// the access code.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrackedCaseDto {
    pub case_id: String,
    pub title: String,
    pub status: CaseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub communications: Vec<CommunicationDto>,
}

impl TrackedCaseDto {
    pub fn from_parts(case: Case, communications: Vec<CommunicationDto>) -> Self {
        Self {
            case_id: case.case_id,
            title: case.title,
            status: case.status,
            resolution_summary: case.resolution_summary,
            closed_at: case.closed_at,
            created_at: case.created_at,
            updated_at: case.updated_at,
            communications,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cases::models::{
        CurrencyCode, MisconductStatus, OrganisationType, TipType,
    };
    use chrono::{Duration, NaiveDate};
    use uuid::Uuid;

    fn tracked_case() -> Case {
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
            reporter_surname: Some("Adeyemi".to_string()),
            reporter_firstname: Some("Ngozi".to_string()),
            reporter_phone: Some("+2348012345678".to_string()),
            reporter_email: Some("reporter@example.com".to_string()),
            reporter_address: None,
            evidence_file: Some("uploads/evidence-417.pdf".to_string()),
            status: CaseStatus::UnderReview,
            assigned_investigator: Some("staff-onyeka".to_string()),
            investigation_notes: Some("Interview scheduled".to_string()),
            resolution_summary: None,
            closed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_tracked_view_never_carries_private_fields() {
        let json = serde_json::to_value(TrackedCaseDto::from_parts(tracked_case(), Vec::new()))
            .unwrap();
        let keys: Vec<&str> = json
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        for private in [
            "access_code",
            "reporter_surname",
            "reporter_firstname",
            "reporter_phone",
            "reporter_email",
            "reporter_address",
            "assigned_investigator",
            "investigation_notes",
            "evidence_file",
        ] {
            assert!(!keys.contains(&private), "tracked view leaked {}", private);
        }

        assert_eq!(json["case_id"], "WB2025000417");
        assert_eq!(json["status"], "under_review");
    }

    #[test]
    fn test_tracked_view_keeps_thread_order() {
        let first = Utc::now();
        let communications = vec![
            CommunicationDto {
                id: Uuid::new_v4(),
                message: "We have received your report.".to_string(),
                is_from_investigator: true,
                sender_name: "Onyeka".to_string(),
                created_at: first,
            },
            CommunicationDto {
                id: Uuid::new_v4(),
                message: "Thank you, I have more documents.".to_string(),
                is_from_investigator: false,
                sender_name: "Anonymous".to_string(),
                created_at: first + Duration::minutes(5),
            },
        ];

        let dto = TrackedCaseDto::from_parts(tracked_case(), communications);
        assert_eq!(dto.communications.len(), 2);
        assert!(dto.communications[0].created_at < dto.communications[1].created_at);
        assert!(dto.communications[0].is_from_investigator);
    }

    #[test]
    fn test_valid_credentials_pass() {
        let dto = TrackCaseDto {
            case_id: "WB2025000417".to_string(),
            access_code: "A7KQ20ZX".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_malformed_case_id_rejected() {
        let dto = TrackCaseDto {
            case_id: "CASE-2025-1".to_string(),
            access_code: "A7KQ20ZX".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_lowercase_access_code_rejected() {
        let dto = TrackCaseDto {
            case_id: "WB2025000417".to_string(),
            access_code: "a7kq20zx".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_credential_errors_use_the_generic_message() {
        let dto = TrackCaseDto {
            case_id: "nope".to_string(),
            access_code: "nope".to_string(),
        };
        let err = dto.validate().unwrap_err().to_string();
        assert!(err.contains("Invalid case ID or access code"));
        assert!(!err.contains("WB"));
    }

    #[test]
    fn test_empty_message_rejected() {
        let dto = WhistleblowerMessageDto {
            case_id: "WB2025000417".to_string(),
            access_code: "A7KQ20ZX".to_string(),
            message: String::new(),
        };
        assert!(dto.validate().is_err());
    }
}
