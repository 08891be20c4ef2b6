use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::cases::models::Case;
use crate::features::cases::CaseService;
use crate::features::rate_limits::ThrottleService;

/// Service for verifying anonymous tracking credentials
pub struct TrackingService {
    case_service: Arc<CaseService>,
    throttle_service: Arc<ThrottleService>,
}

impl TrackingService {
    pub fn new(case_service: Arc<CaseService>, throttle_service: Arc<ThrottleService>) -> Self {
        Self {
            case_service,
            throttle_service,
        }
    }

    /// Verify tracking credentials for an anonymous caller.
    ///
    /// A throttled client is rejected before any lookup happens. The outcome
    /// of each permitted attempt is recorded so the throttle can count
    /// failures.
    pub async fn authenticate(
        &self,
        case_id: &str,
        access_code: &str,
        client_key: &str,
    ) -> Result<Case> {
        self.throttle_service.check(client_key).await?;

        match self
            .case_service
            .get_by_credentials(case_id, access_code)
            .await
        {
            Ok(case) => {
                self.throttle_service.record_attempt(client_key, true).await?;
                Ok(case)
            }
            Err(e @ AppError::NotFound(_)) => {
                self.throttle_service
                    .record_attempt(client_key, false)
                    .await?;
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}
