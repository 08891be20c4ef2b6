use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database model for a message on a case thread.
/// Messages are append-only: the API has no update or delete path for them.
#[derive(Debug, Clone, FromRow)]
pub struct Communication {
    pub id: Uuid,
    pub case_ref: Uuid,
    pub message: String,
    pub is_from_investigator: bool,
    pub sender_name: String,
    pub created_at: DateTime<Utc>,
}
