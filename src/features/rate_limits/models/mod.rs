pub mod rate_limit_config;

pub use rate_limit_config::RateLimitConfig;
