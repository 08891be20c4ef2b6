use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::audit::models::AuditLog;

const INSERT_ENTRY: &str = r#"
    INSERT INTO audit_logs (case_ref, actor, action, details)
    VALUES ($1, $2, $3, $4)
    RETURNING id, case_ref, actor, action, details, created_at
"#;

/// Service for the append-only audit trail
pub struct AuditService {
    pool: PgPool,
}

impl AuditService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Record an entry inside a caller-owned transaction.
    ///
    /// Used wherever an audit entry must commit atomically with the state
    /// change it describes. A failure here aborts the whole transaction.
    pub async fn record_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        case_ref: Uuid,
        actor: Option<&str>,
        action: &str,
        details: Option<&str>,
    ) -> Result<AuditLog> {
        let entry = sqlx::query_as::<_, AuditLog>(INSERT_ENTRY)
            .bind(case_ref)
            .bind(actor)
            .bind(action)
            .bind(details)
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to record audit entry: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(entry)
    }

    /// List the audit trail for a case, most recent first
    pub async fn list_for_case(&self, case_ref: Uuid) -> Result<Vec<AuditLog>> {
        let entries = sqlx::query_as::<_, AuditLog>(
            r#"
            SELECT id, case_ref, actor, action, details, created_at
            FROM audit_logs
            WHERE case_ref = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(case_ref)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list audit entries: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(entries)
    }
}
