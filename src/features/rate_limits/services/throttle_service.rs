use std::sync::Arc;

use sqlx::PgPool;

use crate::core::error::{AppError, Result};
use crate::features::rate_limits::services::RateLimitConfigService;

/// True once the failure count has reached the configured limit
fn exhausted(failures: i64, limit: i32) -> bool {
    failures >= i64::from(limit)
}

/// Failed attempts inside this window count against the allowance
const COUNT_WINDOW_HOURS: i32 = 1;

/// Attempt rows older than this are cleared whenever a new one is written;
/// there is no background sweeper
const RETENTION_HOURS: i32 = 24;

/// Service for throttling case tracking attempts.
///
/// Tracking is anonymous, so throttling keys on the caller network address
/// rather than an account. Only failed attempts count against the limit; a
/// reporter who knows their credentials can check in as often as they like.
pub struct ThrottleService {
    pool: PgPool,
    config_service: Arc<RateLimitConfigService>,
}

impl ThrottleService {
    pub fn new(pool: PgPool, config_service: Arc<RateLimitConfigService>) -> Self {
        Self {
            pool,
            config_service,
        }
    }

    /// Count failed tracking attempts for this client in the trailing window
    pub async fn count_recent_failures(&self, client_key: &str) -> Result<i64> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM tracking_attempts
            WHERE client_key = $1
              AND succeeded = FALSE
              AND attempted_at >= NOW() - make_interval(hours => $2)
            "#,
        )
        .bind(client_key)
        .bind(COUNT_WINDOW_HOURS)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to count tracking attempts: {:?}", e);
            AppError::Database(e)
        })?;

        Ok(count)
    }

    /// Reject the attempt once the client has exhausted its hourly allowance
    pub async fn check(&self, client_key: &str) -> Result<()> {
        let limit = self.config_service.get_tracking_attempts_per_hour().await?;
        let failures = self.count_recent_failures(client_key).await?;

        if exhausted(failures, limit) {
            tracing::warn!("Tracking attempt throttled ({} recent failures)", failures);
            return Err(AppError::RateLimitExceeded(
                "Too many failed tracking attempts. Please try again later.".to_string(),
            ));
        }

        Ok(())
    }

    /// Record the outcome of a tracking attempt, pruning aged-out rows first
    pub async fn record_attempt(&self, client_key: &str, succeeded: bool) -> Result<()> {
        sqlx::query(
            "DELETE FROM tracking_attempts WHERE attempted_at < NOW() - make_interval(hours => $1)",
        )
        .bind(RETENTION_HOURS)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to prune tracking attempts: {:?}", e);
            AppError::Database(e)
        })?;

        sqlx::query("INSERT INTO tracking_attempts (client_key, succeeded) VALUES ($1, $2)")
            .bind(client_key)
            .bind(succeeded)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to record tracking attempt: {:?}", e);
                AppError::Database(e)
            })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_limit_is_inclusive() {
        assert!(!exhausted(19, 20));
        assert!(exhausted(20, 20));
        assert!(exhausted(21, 20));
    }

    #[test]
    fn test_zero_limit_blocks_everything() {
        assert!(exhausted(0, 0));
    }

    #[test]
    fn test_retention_outlives_the_counting_window() {
        assert!(RETENTION_HOURS >= COUNT_WINDOW_HOURS);
    }
}
