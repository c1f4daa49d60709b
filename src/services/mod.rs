pub mod chart_service;
pub mod dashboard_service;
