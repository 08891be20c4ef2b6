pub mod rate_limit_config_handler;

pub use rate_limit_config_handler::*;
