use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use utoipa::ToSchema;
use uuid::Uuid;

/// Case lifecycle status matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "case_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    New,
    UnderReview,
    Investigating,
    Closed,
}

impl CaseStatus {
    /// Human-readable label used in audit trail entries
    pub fn display_name(&self) -> &'static str {
        match self {
            CaseStatus::New => "New",
            CaseStatus::UnderReview => "Under Review",
            CaseStatus::Investigating => "Investigating",
            CaseStatus::Closed => "Closed",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CaseStatus::New => write!(f, "new"),
            CaseStatus::UnderReview => write!(f, "under_review"),
            CaseStatus::Investigating => write!(f, "investigating"),
            CaseStatus::Closed => write!(f, "closed"),
        }
    }
}

/// Category of the reported misconduct matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "tip_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum TipType {
    DiversionOfRevenues,
    Corruption,
    NoncomplianceWithEfficiencyGuidelines,
    Fraud,
    InformationOnStolenPublicFunds,
    ManipulationOfDataOrRecords,
    ConversionOfFundsToPersonalUse,
    ViolationOfTsaGuidelines,
    MisappropriationOfPublicFunds,
    ConflictOfInterest,
    CollectingSolicitingBribes,
    FraudulentPayment,
    UndocumentedExpenditures,
    SplittingContracts,
    ViolationOfProcurementProcedures,
    ProcurementFraud,
    NonRemittanceOfRevenue,
    InformationOnConcealedPublicFunds,
    UnapprovedExpenditures,
}

/// Kind of organisation the report concerns matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "organisation_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrganisationType {
    Ministry,
    Department,
    Agency,
    Other,
}

/// Whether the reported misconduct is still ongoing matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "misconduct_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MisconductStatus {
    Yes,
    No,
    Unknown,
}

/// ISO currency for the reported amount matching database enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type, ToSchema)]
#[sqlx(type_name = "currency_code", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Ngn,
    Usd,
    Gbp,
    Eur,
}

/// Database model for a whistleblower case
#[derive(Debug, Clone, FromRow)]
pub struct Case {
    pub id: Uuid,
    pub case_id: String,
    pub access_code: String,
    pub title: String,
    pub tip_type: TipType,
    pub organisation_type: OrganisationType,
    pub misconduct_ongoing: MisconductStatus,
    pub organisation_name: String,
    pub incident_date: NaiveDate,
    pub persons_involved: Option<String>,
    pub amount_involved: Option<Decimal>,
    pub amount_currency: CurrencyCode,
    pub branch_address: Option<String>,
    pub description_of_tip: String,
    pub other_agency_name: Option<String>,
    pub other_agency_date: Option<NaiveDate>,
    pub reporter_surname: Option<String>,
    pub reporter_firstname: Option<String>,
    pub reporter_phone: Option<String>,
    pub reporter_email: Option<String>,
    pub reporter_address: Option<String>,
    pub evidence_file: Option<String>,
    pub status: CaseStatus,
    pub assigned_investigator: Option<String>,
    pub investigation_notes: Option<String>,
    pub resolution_summary: Option<String>,
    pub closed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_matches_wire_format() {
        assert_eq!(CaseStatus::New.to_string(), "new");
        assert_eq!(CaseStatus::UnderReview.to_string(), "under_review");
        assert_eq!(CaseStatus::Investigating.to_string(), "investigating");
        assert_eq!(CaseStatus::Closed.to_string(), "closed");
    }

    #[test]
    fn test_status_display_names() {
        assert_eq!(CaseStatus::New.display_name(), "New");
        assert_eq!(CaseStatus::UnderReview.display_name(), "Under Review");
        assert_eq!(CaseStatus::Investigating.display_name(), "Investigating");
        assert_eq!(CaseStatus::Closed.display_name(), "Closed");
    }

    #[test]
    fn test_status_serde_round_trip() {
        let json = serde_json::to_string(&CaseStatus::UnderReview).unwrap();
        assert_eq!(json, "\"under_review\"");

        let parsed: CaseStatus = serde_json::from_str("\"investigating\"").unwrap();
        assert_eq!(parsed, CaseStatus::Investigating);
    }

    #[test]
    fn test_tip_type_serde_values() {
        assert_eq!(
            serde_json::to_string(&TipType::ViolationOfTsaGuidelines).unwrap(),
            "\"violation_of_tsa_guidelines\""
        );
        assert_eq!(
            serde_json::to_string(&TipType::NonRemittanceOfRevenue).unwrap(),
            "\"non_remittance_of_revenue\""
        );
    }

    #[test]
    fn test_currency_serde_uppercase() {
        assert_eq!(serde_json::to_string(&CurrencyCode::Ngn).unwrap(), "\"NGN\"");
        let parsed: CurrencyCode = serde_json::from_str("\"EUR\"").unwrap();
        assert_eq!(parsed, CurrencyCode::Eur);
    }
}
