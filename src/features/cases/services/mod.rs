pub mod case_service;
pub mod lifecycle_service;

pub use case_service::CaseService;
pub use lifecycle_service::LifecycleService;
