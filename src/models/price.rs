//! Price table records

use chrono::{NaiveDate, NaiveDateTime};

use super::Metal;

/// One row of the price file
///
/// `timestamp` is `None` when the `DateTime` cell could not be parsed; such rows
/// stay in the table but never match a date range.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub timestamp: Option<NaiveDateTime>,
    pub prices: [Option<f64>; 7],
}

impl PriceRecord {
    pub fn price(&self, metal: Metal) -> Option<f64> {
        self.prices[metal.index()]
    }

    /// True when the row has a valid timestamp whose calendar day lies in `[start, end]`
    pub fn in_range(&self, start: NaiveDate, end: NaiveDate) -> bool {
        match self.timestamp {
            Some(ts) => {
                let day = ts.date();
                start <= day && day <= end
            }
            None => false,
        }
    }
}
