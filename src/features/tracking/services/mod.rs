pub mod tracking_service;

pub use tracking_service::TrackingService;
