pub mod price_table;

pub use price_table::PriceTable;

use std::path::Path;

use tracing::{info, warn};

use crate::utils::DataError;

/// Load the price table from disk
pub fn init_table(path: &Path) -> Result<PriceTable, DataError> {
    let table = PriceTable::load(path)?;
    if table.is_empty() {
        warn!("Price file {} has no rows; every chart will be empty", path.display());
    }

    match table.date_bounds() {
        Some((min, max)) => info!(
            "Loaded {} price rows from {} ({} to {})",
            table.len(),
            path.display(),
            min,
            max
        ),
        None => info!(
            "Loaded {} price rows from {} (no valid timestamps)",
            table.len(),
            path.display()
        ),
    }

    Ok(table)
}
