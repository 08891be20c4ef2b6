use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::features::communications::models::Communication;

/// One message on a case thread, as shown to both the reporter and staff
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommunicationDto {
    pub id: Uuid,
    pub message: String,
    pub is_from_investigator: bool,
    pub sender_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<Communication> for CommunicationDto {
    fn from(c: Communication) -> Self {
        Self {
            id: c.id,
            message: c.message,
            is_from_investigator: c.is_from_investigator,
            sender_name: c.sender_name,
            created_at: c.created_at,
        }
    }
}
