use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod data;
mod models;
mod services;
mod utils;

use api::AppState;
use config::{Config, CHART_STYLE};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    // Initialize tracing
    let mut filter = EnvFilter::from_default_env();
    for directive in ["metal_prices=debug", "tower_http=info"] {
        if let Ok(d) = directive.parse() {
            filter = filter.add_directive(d);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("🪙 Starting precious metal price dashboard...");

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let addr = match config.bind_addr() {
        Ok(a) => a,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Load the price table once; it is read-only from here on
    info!("Loading prices from {}...", config.prices_csv.display());
    let table = match data::init_table(&config.prices_csv) {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to load price table: {}", e);
            std::process::exit(1);
        }
    };

    let state = AppState {
        table,
        style: CHART_STYLE,
    };

    if let Err(e) = api::start_server(state, addr).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
