use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::audit::models::AuditLog;

/// Audit trail entry as shown on the staff case detail view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AuditLogDto {
    pub id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actor: Option<String>,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<AuditLog> for AuditLogDto {
    fn from(entry: AuditLog) -> Self {
        Self {
            id: entry.id,
            actor: entry.actor,
            action: entry.action,
            details: entry.details,
            created_at: entry.created_at,
        }
    }
}
