use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::rate_limits::models::RateLimitConfig;

/// Response DTO for rate limit configuration
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RateLimitConfigResponseDto {
    pub key: String,
    pub value: i32,
    pub description: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl From<RateLimitConfig> for RateLimitConfigResponseDto {
    fn from(config: RateLimitConfig) -> Self {
        Self {
            key: config.key,
            value: config.value,
            description: config.description,
            updated_at: config.updated_at,
        }
    }
}

/// Request DTO for updating rate limit configuration
#[derive(Debug, Clone, Deserialize, Serialize, Validate, ToSchema)]
pub struct UpdateRateLimitConfigDto {
    #[validate(range(min = 1, message = "Value must be at least 1"))]
    pub value: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_value_rejected() {
        let dto = UpdateRateLimitConfigDto { value: 0 };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_positive_value_accepted() {
        let dto = UpdateRateLimitConfigDto { value: 20 };
        assert!(dto.validate().is_ok());
    }
}
