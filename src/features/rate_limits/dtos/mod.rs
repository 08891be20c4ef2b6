pub mod rate_limit_config_dto;

pub use rate_limit_config_dto::*;
