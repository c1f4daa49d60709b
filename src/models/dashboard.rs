//! Dashboard control models

use chrono::NaiveDate;
use serde::Serialize;

use super::Metal;

/// What the dashboard page needs to build its dropdown and date picker
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardOptions {
    pub title: String,
    pub description: String,
    pub metals: Vec<Metal>,
    pub default_metal: Metal,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}
