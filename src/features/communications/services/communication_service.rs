use std::sync::Mutex;

use sqlx::PgPool;
use uuid::{ContextV7, Timestamp, Uuid};

use crate::core::error::{AppError, Result};
use crate::features::audit::AuditService;
use crate::features::cases::models::Case;
use crate::features::communications::models::Communication;
use crate::shared::constants::{ACTION_MESSAGE_FROM_WHISTLEBLOWER, ANONYMOUS_SENDER_NAME};

const INSERT_MESSAGE: &str = r#"
    INSERT INTO communications (id, case_ref, message, is_from_investigator, sender_name)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id, case_ref, message, is_from_investigator, sender_name, created_at
"#;

/// Service for the per-case communication thread
pub struct CommunicationService {
    pool: PgPool,
    id_clock: Mutex<ContextV7>,
}

impl CommunicationService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            id_clock: Mutex::new(ContextV7::new()),
        }
    }

    /// Mint the next message id. Ids are minted time-ordered (v7) through a
    /// shared counter, so the thread tiebreak on `id` follows insertion
    /// order even when two rows share a `created_at`.
    fn next_message_id(&self) -> Uuid {
        let id_clock = self.id_clock.lock().expect("id clock mutex poisoned");
        Uuid::new_v7(Timestamp::now(&*id_clock))
    }

    /// Append a reporter-side message to the thread.
    ///
    /// The message insert and its audit entry commit in one transaction.
    /// Callers must have verified the case credentials first.
    pub async fn append_from_whistleblower(
        &self,
        case: &Case,
        message: &str,
    ) -> Result<Communication> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let communication = sqlx::query_as::<_, Communication>(INSERT_MESSAGE)
            .bind(self.next_message_id())
            .bind(case.id)
            .bind(message)
            .bind(false)
            .bind(ANONYMOUS_SENDER_NAME)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to append whistleblower message: {:?}", e);
                AppError::Database(e)
            })?;

        AuditService::record_in_tx(
            &mut tx,
            case.id,
            None,
            ACTION_MESSAGE_FROM_WHISTLEBLOWER,
            Some("New message received from whistleblower"),
        )
        .await?;

        tx.commit().await.map_err(AppError::Database)?;

        tracing::info!(
            "Whistleblower message appended: case={}, communication={}",
            case.case_id,
            communication.id
        );

        Ok(communication)
    }

    /// Append an investigator reply to the thread.
    pub async fn append_from_investigator(
        &self,
        case: &Case,
        message: &str,
        sender_name: &str,
    ) -> Result<Communication> {
        let communication = sqlx::query_as::<_, Communication>(INSERT_MESSAGE)
            .bind(self.next_message_id())
            .bind(case.id)
            .bind(message)
            .bind(true)
            .bind(sender_name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to append investigator message: {:?}", e);
                AppError::Database(e)
            })?;

        tracing::info!(
            "Investigator message appended: case={}, communication={}",
            case.case_id,
            communication.id
        );

        Ok(communication)
    }

    /// List the thread for a case in chronological order
    pub async fn list_for_case(&self, case_ref: Uuid) -> Result<Vec<Communication>> {
        let communications = sqlx::query_as::<_, Communication>(
            r#"
            SELECT id, case_ref, message, is_from_investigator, sender_name, created_at
            FROM communications
            WHERE case_ref = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(case_ref)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list communications: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(communications)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_message_ids_follow_creation_order() {
        let pool = PgPool::connect_lazy("postgres://localhost/tipline_test").expect("lazy pool");
        let service = CommunicationService::new(pool);

        let ids: Vec<Uuid> = (0..64).map(|_| service.next_message_id()).collect();

        assert_eq!(ids[0].get_version_num(), 7);
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }
}
