pub mod auth_service;
pub mod content_service;
pub mod linkedin_service;
pub mod metrics_service;
pub mod optimization_service;
pub mod profile_service;
