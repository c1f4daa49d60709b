//! Metal names and parsing

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::ChartError;

/// The seven metals tracked by the price file, in column order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metal {
    Platinum,
    Gold,
    Silver,
    Palladium,
    Rhodium,
    Iridium,
    Ruthenium,
}

impl Metal {
    pub const ALL: [Metal; 7] = [
        Metal::Platinum,
        Metal::Gold,
        Metal::Silver,
        Metal::Palladium,
        Metal::Rhodium,
        Metal::Iridium,
        Metal::Ruthenium,
    ];

    /// Column header used for this metal in the CSV
    pub fn name(self) -> &'static str {
        match self {
            Metal::Platinum => "Platinum",
            Metal::Gold => "Gold",
            Metal::Silver => "Silver",
            Metal::Palladium => "Palladium",
            Metal::Rhodium => "Rhodium",
            Metal::Iridium => "Iridium",
            Metal::Ruthenium => "Ruthenium",
        }
    }

    /// Position of this metal in `Metal::ALL` and in a record's price array
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Metal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metal {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Metal::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ChartError::UnknownMetal(s.to_string()))
    }
}
