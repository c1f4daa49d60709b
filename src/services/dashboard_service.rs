use crate::config::ChartStyle;
use crate::data::PriceTable;
use crate::models::{DashboardOptions, Metal};

/// Describe the dashboard controls for the loaded table
///
/// The date picker is bounded by the table's first and last valid day and starts
/// out covering the whole range.
pub fn dashboard_options(table: &PriceTable, style: &ChartStyle) -> DashboardOptions {
    let bounds = table.date_bounds();

    DashboardOptions {
        title: style.dashboard_title.to_string(),
        description: style.dashboard_description.to_string(),
        metals: Metal::ALL.to_vec(),
        default_metal: style.default_metal,
        min_date: bounds.map(|(min, _)| min),
        max_date: bounds.map(|(_, max)| max),
        start_date: bounds.map(|(min, _)| min),
        end_date: bounds.map(|(_, max)| max),
    }
}
