use sqlx::PgPool;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::audit::AuditService;
use crate::features::cases::models::{Case, CaseStatus};

use super::case_service::CASE_COLUMNS;

/// Trimmed, non-empty resolution summary, if one was supplied
fn normalized_summary(resolution_summary: Option<&str>) -> Option<&str> {
    resolution_summary.map(str::trim).filter(|s| !s.is_empty())
}

/// What a requested status means for the stored row
#[derive(Debug, PartialEq)]
enum StatusChange<'a> {
    Unchanged,
    Transition,
    Close { summary: &'a str },
}

/// Decide the transition before touching the row.
///
/// A repeated status is a no-op checked before anything else, so re-closing
/// an already-closed case needs no summary. Any other target is a plain
/// transition unless it is Closed, which demands a non-blank summary.
fn plan_status_change<'a>(
    current: CaseStatus,
    requested: CaseStatus,
    resolution_summary: Option<&'a str>,
) -> Result<StatusChange<'a>> {
    if current == requested {
        return Ok(StatusChange::Unchanged);
    }

    if requested == CaseStatus::Closed {
        let summary = normalized_summary(resolution_summary).ok_or_else(|| {
            AppError::Validation("A resolution summary is required to close a case".to_string())
        })?;
        return Ok(StatusChange::Close { summary });
    }

    Ok(StatusChange::Transition)
}

/// Audit line for a completed transition
fn transition_audit(requested: CaseStatus, actor: &str) -> (String, String) {
    (
        format!("Status Changed to {}", requested.display_name()),
        format!("Status updated by {}", actor),
    )
}

/// Service for moving cases through their lifecycle
pub struct LifecycleService {
    pool: PgPool,
}

impl LifecycleService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Change the status of a case on behalf of a staff member.
    ///
    /// Closing requires a non-empty resolution summary and stamps closed_at.
    /// Repeating the current status is a no-op that leaves the audit trail
    /// untouched. The update and its audit entry commit together; the row is
    /// locked so concurrent transitions serialize.
    pub async fn update_status(
        &self,
        id: Uuid,
        new_status: CaseStatus,
        resolution_summary: Option<&str>,
        actor: &str,
    ) -> Result<Case> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let current = sqlx::query_as::<_, Case>(&format!(
            "SELECT {} FROM cases WHERE id = $1 FOR UPDATE",
            CASE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to load case for status update: {:?}", e);
            AppError::Database(e)
        })?
        .ok_or_else(|| AppError::NotFound(format!("Case '{}' not found", id)))?;

        let case = match plan_status_change(current.status, new_status, resolution_summary)? {
            StatusChange::Unchanged => return Ok(current),
            StatusChange::Close { summary } => sqlx::query_as::<_, Case>(&format!(
                "UPDATE cases SET status = $1, resolution_summary = $2, closed_at = NOW(), \
                 updated_at = NOW() WHERE id = $3 RETURNING {}",
                CASE_COLUMNS
            ))
            .bind(new_status)
            .bind(summary)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?,
            StatusChange::Transition => sqlx::query_as::<_, Case>(&format!(
                "UPDATE cases SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
                CASE_COLUMNS
            ))
            .bind(new_status)
            .bind(id)
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::Database)?,
        };

        let (action, details) = transition_audit(new_status, actor);
        AuditService::record_in_tx(&mut tx, case.id, Some(actor), &action, Some(&details)).await?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Case status changed: case_id={}, from={}, to={}",
            case.case_id,
            current.status,
            new_status
        );
        Ok(case)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_summary_is_rejected_for_close() {
        assert_eq!(normalized_summary(None), None);
    }

    #[test]
    fn test_blank_summary_is_rejected_for_close() {
        assert_eq!(normalized_summary(Some("   ")), None);
        assert_eq!(normalized_summary(Some("")), None);
    }

    #[test]
    fn test_summary_is_trimmed() {
        assert_eq!(
            normalized_summary(Some("  Funds recovered and returned.  ")),
            Some("Funds recovered and returned.")
        );
    }

    #[test]
    fn test_repeated_status_is_a_no_op() {
        let plan = plan_status_change(CaseStatus::UnderReview, CaseStatus::UnderReview, None);
        assert_eq!(plan.unwrap(), StatusChange::Unchanged);
    }

    #[test]
    fn test_reclosing_a_closed_case_needs_no_summary() {
        let plan = plan_status_change(CaseStatus::Closed, CaseStatus::Closed, None);
        assert_eq!(plan.unwrap(), StatusChange::Unchanged);
    }

    #[test]
    fn test_closing_without_a_summary_is_rejected() {
        for summary in [None, Some(""), Some("   ")] {
            let plan = plan_status_change(CaseStatus::Investigating, CaseStatus::Closed, summary);
            assert!(matches!(plan, Err(AppError::Validation(_))));
        }
    }

    #[test]
    fn test_closing_carries_the_trimmed_summary() {
        let plan = plan_status_change(
            CaseStatus::New,
            CaseStatus::Closed,
            Some("  Funds recovered and returned.  "),
        );
        assert_eq!(
            plan.unwrap(),
            StatusChange::Close {
                summary: "Funds recovered and returned."
            }
        );
    }

    #[test]
    fn test_other_transitions_need_no_summary() {
        let forward = plan_status_change(CaseStatus::New, CaseStatus::Investigating, None);
        assert_eq!(forward.unwrap(), StatusChange::Transition);

        let reopened = plan_status_change(CaseStatus::Closed, CaseStatus::UnderReview, None);
        assert_eq!(reopened.unwrap(), StatusChange::Transition);
    }

    #[test]
    fn test_audit_line_names_the_new_status() {
        let (action, details) = transition_audit(CaseStatus::UnderReview, "auditor@agency.gov.ng");
        assert_eq!(action, "Status Changed to Under Review");
        assert_eq!(details, "Status updated by auditor@agency.gov.ng");
    }
}
