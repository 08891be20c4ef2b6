use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::audit::AuditService;
use crate::features::cases::dtos::{CaseQueryParams, SubmitCaseDto};
use crate::features::cases::identity;
use crate::features::cases::models::{Case, CurrencyCode};
use crate::shared::constants::ACTION_REPORT_SUBMITTED;

/// Maximum insert attempts before giving up on a unique case identifier
const MAX_CASE_ID_ATTEMPTS: u32 = 5;

/// Failure message shared by every credential mismatch. Deliberately does not
/// say which of the two fields was wrong.
pub const CREDENTIAL_MISMATCH_MESSAGE: &str = "Invalid case ID or access code";

/// Column list shared by every query that loads a full case row
pub(crate) const CASE_COLUMNS: &str = "id, case_id, access_code, title, tip_type, organisation_type, \
     misconduct_ongoing, organisation_name, incident_date, persons_involved, amount_involved, \
     amount_currency, branch_address, description_of_tip, other_agency_name, other_agency_date, \
     reporter_surname, reporter_firstname, reporter_phone, reporter_email, reporter_address, \
     evidence_file, status, assigned_investigator, investigation_notes, resolution_summary, \
     closed_at, created_at, updated_at";

/// Append the staff list filters as a WHERE clause
fn push_case_filters(builder: &mut QueryBuilder<'_, Postgres>, params: &CaseQueryParams) {
    let mut prefix = " WHERE ";

    if let Some(status) = params.status {
        builder.push(prefix).push("status = ").push_bind(status);
        prefix = " AND ";
    }

    if let Some(tip_type) = params.tip_type {
        builder.push(prefix).push("tip_type = ").push_bind(tip_type);
        prefix = " AND ";
    }

    if let Some(ref search) = params.search {
        let pattern = format!("%{}%", search);
        builder
            .push(prefix)
            .push("(case_id ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR title ILIKE ")
            .push_bind(pattern.clone())
            .push(" OR organisation_name ILIKE ")
            .push_bind(pattern)
            .push(")");
    }
}

/// True when the error is a unique violation on the public case identifier
fn is_case_id_collision(e: &sqlx::Error) -> bool {
    if let sqlx::Error::Database(db_err) = e {
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return db_err
                .constraint()
                .map(|c| c.contains("cases_case_id_key"))
                .unwrap_or(false);
        }
    }
    false
}

/// Service for creating and reading whistleblower cases
pub struct CaseService {
    pool: PgPool,
}

impl CaseService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new case from a public submission.
    ///
    /// The insert and its "Report Submitted" audit entry commit in one
    /// transaction. A collision on the generated case identifier regenerates
    /// the identifier and retries, up to MAX_CASE_ID_ATTEMPTS.
    pub async fn create(&self, dto: SubmitCaseDto) -> Result<Case> {
        let access_code = identity::generate_access_code();
        let currency = dto.amount_currency.unwrap_or(CurrencyCode::Ngn);

        let insert_sql = format!(
            r#"
            INSERT INTO cases (
                case_id, access_code, title, tip_type, organisation_type,
                misconduct_ongoing, organisation_name, incident_date, persons_involved,
                amount_involved, amount_currency, branch_address, description_of_tip,
                other_agency_name, other_agency_date, reporter_surname, reporter_firstname,
                reporter_phone, reporter_email, reporter_address, evidence_file
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11,
                $12, $13, $14, $15, $16, $17, $18, $19, $20, $21
            )
            RETURNING {}
            "#,
            CASE_COLUMNS
        );

        for attempt in 1..=MAX_CASE_ID_ATTEMPTS {
            let case_id = identity::generate_case_id();

            let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

            let inserted = sqlx::query_as::<_, Case>(&insert_sql)
                .bind(&case_id)
                .bind(&access_code)
                .bind(&dto.title)
                .bind(dto.tip_type)
                .bind(dto.organisation_type)
                .bind(dto.misconduct_ongoing)
                .bind(&dto.organisation_name)
                .bind(dto.incident_date)
                .bind(&dto.persons_involved)
                .bind(dto.amount_involved)
                .bind(currency)
                .bind(&dto.branch_address)
                .bind(&dto.description_of_tip)
                .bind(&dto.other_agency_name)
                .bind(dto.other_agency_date)
                .bind(&dto.reporter_surname)
                .bind(&dto.reporter_firstname)
                .bind(&dto.reporter_phone)
                .bind(&dto.reporter_email)
                .bind(&dto.reporter_address)
                .bind(&dto.evidence_file)
                .fetch_one(&mut *tx)
                .await;

            let case = match inserted {
                Ok(case) => case,
                Err(e) if is_case_id_collision(&e) => {
                    let _ = tx.rollback().await;
                    tracing::warn!(
                        "Case identifier collision, retrying (attempt {}/{})",
                        attempt,
                        MAX_CASE_ID_ATTEMPTS
                    );
                    continue;
                }
                Err(e) => {
                    tracing::error!("Failed to create case: {:?}", e);
                    return Err(AppError::Database(e));
                }
            };

            AuditService::record_in_tx(
                &mut tx,
                case.id,
                None,
                ACTION_REPORT_SUBMITTED,
                Some(&format!("New report submitted: {}", case.title)),
            )
            .await?;

            tx.commit().await.map_err(AppError::Database)?;

            tracing::info!("Case created: id={}, case_id={}", case.id, case.case_id);
            return Ok(case);
        }

        Err(AppError::Internal(format!(
            "Could not allocate a unique case identifier after {} attempts",
            MAX_CASE_ID_ATTEMPTS
        )))
    }

    /// Look up a case by its two public credentials.
    ///
    /// Both values must match exactly. Any mismatch, including an unknown
    /// case identifier, yields the same not-found error so callers cannot
    /// learn which identifiers exist.
    pub async fn get_by_credentials(&self, case_id: &str, access_code: &str) -> Result<Case> {
        let case = sqlx::query_as::<_, Case>(&format!(
            "SELECT {} FROM cases WHERE case_id = $1 AND access_code = $2",
            CASE_COLUMNS
        ))
        .bind(case_id)
        .bind(access_code)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to look up case by credentials: {:?}", e);
            AppError::Database(e)
        })?;

        case.ok_or_else(|| AppError::NotFound(CREDENTIAL_MISMATCH_MESSAGE.to_string()))
    }

    /// Get a case by its internal id (staff surface)
    pub async fn get_by_id(&self, id: Uuid) -> Result<Case> {
        let case = sqlx::query_as::<_, Case>(&format!(
            "SELECT {} FROM cases WHERE id = $1",
            CASE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to get case by id: {:?}", e);
            AppError::Database(e)
        })?;

        case.ok_or_else(|| AppError::NotFound(format!("Case '{}' not found", id)))
    }

    /// List cases with filters and pagination (staff surface)
    pub async fn list(&self, params: &CaseQueryParams) -> Result<(Vec<Case>, i64)> {
        let mut count_builder: QueryBuilder<Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM cases");
        push_case_filters(&mut count_builder, params);

        let total: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)?;

        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM cases", CASE_COLUMNS));
        push_case_filters(&mut builder, params);
        builder.push(format!(" ORDER BY created_at {}", params.sort.as_sql()));
        builder.push(" LIMIT ");
        builder.push_bind(params.limit());
        builder.push(" OFFSET ");
        builder.push_bind(params.offset());

        let cases = builder
            .build_query_as::<Case>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok((cases, total))
    }

    /// Update the internal investigation notes. Not audited.
    pub async fn update_notes(&self, id: Uuid, notes: &str) -> Result<Case> {
        let case = sqlx::query_as::<_, Case>(&format!(
            "UPDATE cases SET investigation_notes = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            CASE_COLUMNS
        ))
        .bind(notes)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to update investigation notes: {:?}", e);
            AppError::Database(e)
        })?;

        case.ok_or_else(|| AppError::NotFound(format!("Case '{}' not found", id)))
    }

    /// Assign an investigator to the case. Not audited.
    pub async fn assign_investigator(&self, id: Uuid, investigator: &str) -> Result<Case> {
        let case = sqlx::query_as::<_, Case>(&format!(
            "UPDATE cases SET assigned_investigator = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            CASE_COLUMNS
        ))
        .bind(investigator)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to assign investigator: {:?}", e);
            AppError::Database(e)
        })?;

        case.ok_or_else(|| AppError::NotFound(format!("Case '{}' not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::cases::dtos::SortDirection;
    use crate::features::cases::models::CaseStatus;

    fn query_params() -> CaseQueryParams {
        CaseQueryParams {
            page: 1,
            page_size: 25,
            search: None,
            status: None,
            tip_type: None,
            sort: SortDirection::default(),
        }
    }

    #[test]
    fn test_list_filters_compose_with_numbered_placeholders() {
        let params = CaseQueryParams {
            status: Some(CaseStatus::New),
            search: Some("fraud".to_string()),
            ..query_params()
        };

        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM cases");
        push_case_filters(&mut builder, &params);

        assert_eq!(
            builder.sql(),
            "SELECT COUNT(*) FROM cases WHERE status = $1 AND \
             (case_id ILIKE $2 OR title ILIKE $3 OR organisation_name ILIKE $4)"
        );
    }

    #[test]
    fn test_list_without_filters_has_no_where_clause() {
        let mut builder: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM cases");
        push_case_filters(&mut builder, &query_params());

        assert_eq!(builder.sql(), "SELECT COUNT(*) FROM cases");
    }

    #[test]
    fn test_case_columns_include_every_model_field() {
        // Guards the shared column list against drift when the model grows
        for column in [
            "id",
            "case_id",
            "access_code",
            "status",
            "resolution_summary",
            "closed_at",
            "created_at",
            "updated_at",
        ] {
            assert!(
                CASE_COLUMNS.contains(column),
                "column list is missing {}",
                column
            );
        }
    }

    #[test]
    fn test_collision_detector_rejects_non_database_errors() {
        assert!(!is_case_id_collision(&sqlx::Error::RowNotFound));
    }

    #[derive(Debug)]
    struct StubUniqueViolation {
        constraint: &'static str,
    }

    impl std::fmt::Display for StubUniqueViolation {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "duplicate key value violates unique constraint")
        }
    }

    impl std::error::Error for StubUniqueViolation {}

    impl sqlx::error::DatabaseError for StubUniqueViolation {
        fn message(&self) -> &str {
            "duplicate key value violates unique constraint"
        }

        fn code(&self) -> Option<std::borrow::Cow<'_, str>> {
            Some(std::borrow::Cow::Borrowed("23505"))
        }

        fn constraint(&self) -> Option<&str> {
            Some(self.constraint)
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::UniqueViolation
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }
    }

    #[test]
    fn test_collision_detector_recognizes_the_case_id_constraint() {
        let err = sqlx::Error::Database(Box::new(StubUniqueViolation {
            constraint: "cases_case_id_key",
        }));
        assert!(is_case_id_collision(&err));
    }

    #[test]
    fn test_collision_detector_ignores_other_unique_constraints() {
        let err = sqlx::Error::Database(Box::new(StubUniqueViolation {
            constraint: "rate_limit_configs_key_key",
        }));
        assert!(!is_case_id_collision(&err));
    }
}
