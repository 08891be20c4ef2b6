pub mod tracking_handler;

pub use tracking_handler::*;
