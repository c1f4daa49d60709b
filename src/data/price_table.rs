use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use csv::StringRecord;
use tracing::{debug, warn};

use crate::models::{Metal, PriceRecord};
use crate::utils::DataError;

/// Column holding the row timestamp
pub const DATETIME_COLUMN: &str = "DateTime";

/// Timestamp format of the `DateTime` column
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// In-memory, read-only table of metal prices in file order
#[derive(Debug, Clone, Default)]
pub struct PriceTable {
    records: Vec<PriceRecord>,
}

/// Where each required column sits in a CSV row
struct ColumnMap {
    datetime: usize,
    metals: [usize; 7],
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord) -> Result<Self, DataError> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| DataError::MissingColumn(name.to_string()))
        };

        let datetime = find(DATETIME_COLUMN)?;
        let mut metals = [0usize; 7];
        for metal in Metal::ALL {
            metals[metal.index()] = find(metal.name())?;
        }

        Ok(ColumnMap { datetime, metals })
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), DATETIME_FORMAT).ok()
}

fn parse_price(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|p| p.is_finite())
}

impl PriceTable {
    pub fn new(records: Vec<PriceRecord>) -> Self {
        PriceTable { records }
    }

    /// Open and parse the price CSV at `path`
    pub fn load(path: &Path) -> Result<Self, DataError> {
        let file = File::open(path).map_err(|e| DataError::Open {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_reader(file)
    }

    /// Parse a price CSV with a header row
    ///
    /// Unparseable timestamps and prices are coerced to `None` rather than failing the load.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DataError> {
        let mut rdr = csv::Reader::from_reader(reader);
        let columns = ColumnMap::from_headers(rdr.headers()?)?;

        let mut records = Vec::new();
        let mut bad_timestamps = 0usize;
        let mut bad_prices = 0usize;

        for row in rdr.records() {
            let row = row?;
            let field = |idx: usize| row.get(idx).unwrap_or("");

            let timestamp = parse_timestamp(field(columns.datetime));
            if timestamp.is_none() {
                bad_timestamps += 1;
                debug!("Unparseable timestamp '{}' on line {:?}", field(columns.datetime), row.position().map(|p| p.line()));
            }

            let mut prices = [None; 7];
            for metal in Metal::ALL {
                let raw = field(columns.metals[metal.index()]);
                prices[metal.index()] = parse_price(raw);
                if prices[metal.index()].is_none() && !raw.trim().is_empty() {
                    bad_prices += 1;
                }
            }

            records.push(PriceRecord { timestamp, prices });
        }

        if bad_timestamps > 0 {
            warn!("{} rows have an invalid timestamp and will never match a date range", bad_timestamps);
        }
        if bad_prices > 0 {
            warn!("{} price cells could not be parsed and are treated as missing", bad_prices);
        }

        Ok(PriceTable::new(records))
    }

    pub fn records(&self) -> &[PriceRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest calendar day among rows with a valid timestamp
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut days = self.records.iter().filter_map(|r| r.timestamp).map(|ts| ts.date());
        let first = days.next()?;
        Some(days.fold((first, first), |(min, max), d| (min.min(d), max.max(d))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "DateTime,Platinum,Gold,Silver,Palladium,Rhodium,Iridium,Ruthenium\n";

    fn table(rows: &str) -> PriceTable {
        PriceTable::from_reader(format!("{}{}", HEADER, rows).as_bytes()).expect("load failed")
    }

    #[test]
    fn test_loads_rows_in_file_order() {
        let t = table(
            "2018-01-01 00:00:00,940,1310.0,17.1,1090,1700,1000,80\n\
             2018-01-02 00:00:00,950,1315.0,17.2,1095,1710,1010,81\n",
        );
        assert_eq!(t.len(), 2);
        assert_eq!(t.records()[0].price(Metal::Gold), Some(1310.0));
        assert_eq!(t.records()[1].price(Metal::Ruthenium), Some(81.0));
        assert_eq!(
            t.records()[1].timestamp,
            NaiveDateTime::parse_from_str("2018-01-02 00:00:00", DATETIME_FORMAT).ok()
        );
    }

    #[test]
    fn test_malformed_timestamp_is_coerced() {
        let t = table(
            "not a date,940,1310.0,17.1,1090,1700,1000,80\n\
             2018-01-02 00:00:00,950,1315.0,17.2,1095,1710,1010,81\n",
        );
        assert_eq!(t.len(), 2);
        assert!(t.records()[0].timestamp.is_none());
        assert!(t.records()[1].timestamp.is_some());
    }

    #[test]
    fn test_missing_and_bad_prices_are_none() {
        let t = table("2018-01-01 00:00:00,,1310.0,abc,1090,1700,1000,80\n");
        let r = &t.records()[0];
        assert_eq!(r.price(Metal::Platinum), None);
        assert_eq!(r.price(Metal::Silver), None);
        assert_eq!(r.price(Metal::Gold), Some(1310.0));
    }

    #[test]
    fn test_columns_located_by_name() {
        let csv = "Gold,DateTime,Silver,Platinum,Palladium,Rhodium,Iridium,Ruthenium,Extra\n\
                   1310.0,2018-01-01 00:00:00,17.1,940,1090,1700,1000,80,x\n";
        let t = PriceTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(t.records()[0].price(Metal::Gold), Some(1310.0));
        assert_eq!(t.records()[0].price(Metal::Platinum), Some(940.0));
    }

    #[test]
    fn test_missing_column_fails() {
        let csv = "DateTime,Platinum,Gold,Silver\n2018-01-01 00:00:00,1,2,3\n";
        let err = PriceTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "Palladium"));
    }

    #[test]
    fn test_date_bounds_skip_invalid_rows() {
        let t = table(
            "2018-03-01 10:00:00,1,1,1,1,1,1,1\n\
             garbage,1,1,1,1,1,1,1\n\
             2018-01-05 09:00:00,1,1,1,1,1,1,1\n",
        );
        let (min, max) = t.date_bounds().unwrap();
        assert_eq!(min, NaiveDate::from_ymd_opt(2018, 1, 5).unwrap());
        assert_eq!(max, NaiveDate::from_ymd_opt(2018, 3, 1).unwrap());
    }

    #[test]
    fn test_empty_table_has_no_bounds() {
        let t = table("");
        assert!(t.is_empty());
        assert!(t.date_bounds().is_none());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = PriceTable::load(Path::new("/nonexistent/prices.csv")).unwrap_err();
        assert!(matches!(err, DataError::Open { .. }));
    }
}
