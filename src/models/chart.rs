//! Chart generation models

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::Metal;

/// A single data point on a price chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PricePoint {
    pub timestamp: NaiveDateTime,
    pub price: Option<f64>,
}

/// The metal and inclusive date range a chart is drawn for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartRequest {
    pub metal: Metal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontSpec {
    pub family: String,
    pub size: u32,
    pub color: String,
}

/// Fully resolved description of one chart, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub metal: Metal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub x_label: String,
    pub y_label: String,
    pub color: String,
    pub theme: Theme,
    pub font: FontSpec,
    pub series: Vec<PricePoint>,
}
