pub mod color;
pub mod errors;

pub use color::parse_color;
pub use errors::{ChartError, ConfigError, DataError};
