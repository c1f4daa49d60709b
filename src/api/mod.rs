pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::ChartStyle;
use crate::data::PriceTable;

/// Read-only data every request is served from
#[derive(Debug)]
pub struct AppState {
    pub table: PriceTable,
    pub style: ChartStyle,
}

pub type SharedState = Arc<AppState>;

pub fn create_router(state: SharedState) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/api/options", get(routes::get_options))
        .route("/api/chart", get(routes::get_chart))
        .route("/api/chart.svg", get(routes::get_chart_svg))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

pub async fn start_server(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let app = create_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("📈 Dashboard running on http://{}", addr);
    axum::serve(listener, app).await
}
