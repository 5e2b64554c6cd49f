pub mod dashboard_service;
pub mod query_cache;
