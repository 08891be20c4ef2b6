pub mod rate_limit_config_service;
pub mod throttle_service;

pub use rate_limit_config_service::RateLimitConfigService;
pub use throttle_service::ThrottleService;
