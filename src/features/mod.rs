pub mod audit;
pub mod auth;
pub mod cases;
pub mod communications;
pub mod rate_limits;
pub mod tracking;
