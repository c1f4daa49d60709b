//! Data models for the chart service
//!
//! This module organizes the records, requests and chart descriptions passed
//! between the loader, the services and the HTTP layer.

pub mod chart;
pub mod dashboard;
pub mod metal;
pub mod price;

// Re-export commonly used types for convenience
pub use chart::{ChartRequest, ChartSpec, FontSpec, PricePoint, Theme};
pub use dashboard::DashboardOptions;
pub use metal::Metal;
pub use price::PriceRecord;
