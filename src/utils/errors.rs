use thiserror::Error;

/// Errors raised while loading the price file
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to open price file '{path}': {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Missing column '{0}' in price file")]
    MissingColumn(String),
}

/// Errors raised while building or drawing a chart
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Unknown metal: '{0}'. Supported: Platinum, Gold, Silver, Palladium, Rhodium, Iridium, Ruthenium")]
    UnknownMetal(String),
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// Errors raised while reading configuration from the environment
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}
