use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for an audit trail entry.
/// Rows are append-only: nothing in the service layer updates or deletes them.
#[derive(Debug, Clone, FromRow)]
pub struct AuditLog {
    pub id: Uuid,
    pub case_ref: Uuid,
    /// Staff subject that performed the action; None for anonymous or system events
    pub actor: Option<String>,
    pub action: String,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}
