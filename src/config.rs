use std::net::SocketAddr;
use std::path::PathBuf;

use crate::models::{Metal, Theme};
use crate::utils::ConfigError;

pub const DEFAULT_PRICES_CSV: &str = "precious_metals_prices_2018_2021.csv";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8050;

/// Runtime settings read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub prices_csv: PathBuf,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from any variable source; missing values fall back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prices_csv = lookup("PRICES_CSV")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_PRICES_CSV.to_string());

        let host = lookup("HOST")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            prices_csv: PathBuf::from(prices_csv),
            host,
            port,
        })
    }

    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| ConfigError::Invalid {
                name: "HOST",
                value: self.host.clone(),
            })
    }
}

/// Fixed presentation of every chart, passed explicitly to the renderers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartStyle {
    pub title: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub colors: &'static [(Metal, &'static str)],
    pub fallback_color: &'static str,
    pub theme: Theme,
    pub background: &'static str,
    pub font_family: &'static str,
    pub font_size: u32,
    pub font_color: &'static str,
    pub dashboard_title: &'static str,
    pub dashboard_description: &'static str,
    pub default_metal: Metal,
}

pub const METAL_COLORS: [(Metal, &str); 7] = [
    (Metal::Platinum, "#E5E4E2"),
    (Metal::Gold, "gold"),
    (Metal::Silver, "silver"),
    (Metal::Palladium, "#CED0DD"),
    (Metal::Rhodium, "#E2E7E1"),
    (Metal::Iridium, "#3D3C3A"),
    (Metal::Ruthenium, "#C9CBC8"),
];

pub const CHART_STYLE: ChartStyle = ChartStyle {
    title: "Precious Metal Prices 2018-2021",
    x_label: "Date",
    y_label: "Price (USD/oz)",
    colors: &METAL_COLORS,
    fallback_color: "#636EFA",
    theme: Theme::Dark,
    background: "#111111",
    font_family: "Verdana, sans-serif",
    font_size: 18,
    font_color: "white",
    dashboard_title: "Precious Metal Prices",
    dashboard_description: "The cost of precious metals between 2018 and 2021",
    default_metal: Metal::Gold,
};

impl ChartStyle {
    /// Line color for `metal`, or the fallback when the table has no entry
    pub fn color_for(&self, metal: Metal) -> &'static str {
        self.colors
            .iter()
            .find(|(m, _)| *m == metal)
            .map(|(_, c)| *c)
            .unwrap_or(self.fallback_color)
    }
}
