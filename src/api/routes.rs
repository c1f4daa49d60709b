use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::api::SharedState;
use crate::models::{ChartSpec, DashboardOptions};
use crate::services::{chart_service, dashboard_service};
use crate::utils::ChartError;

const INDEX_HTML: &str = include_str!("../../static/index.html");

const MIN_SIZE: u32 = 200;
const MAX_SIZE: u32 = 4000;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub rows: usize,
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    metal: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    width: Option<u32>,
    height: Option<u32>,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        rows: state.table.len(),
    })
}

pub async fn get_options(State(state): State<SharedState>) -> Json<DashboardOptions> {
    Json(dashboard_service::dashboard_options(&state.table, &state.style))
}

fn error_response(err: ChartError) -> (StatusCode, String) {
    match err {
        ChartError::UnknownMetal(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        ChartError::Render(_) => {
            tracing::error!("Chart rendering failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
        }
    }
}

/// Resolve query defaults: the style's default metal and the table's full date range
fn build_spec(state: &SharedState, params: &ChartQuery) -> Result<ChartSpec, ChartError> {
    let bounds = state.table.date_bounds();
    let metal = params
        .metal
        .as_deref()
        .unwrap_or(state.style.default_metal.name());
    let start_date = params
        .start_date
        .or(bounds.map(|(min, _)| min))
        .unwrap_or_default();
    let end_date = params
        .end_date
        .or(bounds.map(|(_, max)| max))
        .unwrap_or_default();

    chart_service::render(&state.table, &state.style, metal, start_date, end_date)
}

pub async fn get_chart(
    Query(params): Query<ChartQuery>,
    State(state): State<SharedState>,
) -> Result<Json<ChartSpec>, (StatusCode, String)> {
    tracing::debug!("Chart requested: {:?}", params);
    build_spec(&state, &params).map(Json).map_err(error_response)
}

pub async fn get_chart_svg(
    Query(params): Query<ChartQuery>,
    State(state): State<SharedState>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    tracing::debug!("Chart image requested: {:?}", params);
    let spec = build_spec(&state, &params).map_err(error_response)?;

    let width = params
        .width
        .unwrap_or(chart_service::DEFAULT_WIDTH)
        .clamp(MIN_SIZE, MAX_SIZE);
    let height = params
        .height
        .unwrap_or(chart_service::DEFAULT_HEIGHT)
        .clamp(MIN_SIZE, MAX_SIZE);

    let svg = chart_service::render_svg(&spec, &state.style, width, height).map_err(error_response)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::*;
    use crate::api::{create_router, AppState};
    use crate::config::CHART_STYLE;
    use crate::data::PriceTable;

    const CSV: &str = "DateTime,Platinum,Gold,Silver,Palladium,Rhodium,Iridium,Ruthenium\n\
                       2018-01-01 00:00:00,940,1310.0,17.1,1090,1700,1000,80\n\
                       2018-01-02 00:00:00,950,1315.0,17.2,1095,1710,1010,81\n\
                       2018-01-03 00:00:00,945,1300.0,17.0,1092,1705,1005,82\n";

    fn app() -> axum::Router {
        let table = PriceTable::from_reader(CSV.as_bytes()).unwrap();
        create_router(Arc::new(AppState {
            table,
            style: CHART_STYLE,
        }))
    }

    async fn get_with_type(uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, content_type, body.to_vec())
    }

    async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
        let (status, _, body) = get_with_type(uri).await;
        (status, body)
    }

    #[tokio::test]
    async fn test_health_reports_rows() {
        let (status, body) = get("/health").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["ok"], true);
        assert_eq!(json["rows"], 3);
    }

    #[tokio::test]
    async fn test_chart_filters_range() {
        let (status, body) = get("/api/chart?metal=Gold&start_date=2018-01-01&end_date=2018-01-02").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        let series = json["series"].as_array().unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series[0]["price"], 1310.0);
        assert_eq!(series[1]["price"], 1315.0);
        assert_eq!(json["metal"], "Gold");
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["color"], "gold");
    }

    #[tokio::test]
    async fn test_chart_defaults_to_gold_over_full_range() {
        let (status, body) = get("/api/chart").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["metal"], "Gold");
        assert_eq!(json["series"].as_array().unwrap().len(), 3);
        assert_eq!(json["start_date"], "2018-01-01");
        assert_eq!(json["end_date"], "2018-01-03");
    }

    #[tokio::test]
    async fn test_chart_out_of_range_is_empty() {
        let (status, body) = get("/api/chart?metal=Gold&start_date=2017-01-01&end_date=2017-01-02").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(json["series"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_metal_is_bad_request() {
        let (status, body) = get("/api/chart?metal=Copper").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().contains("Unknown metal"));
    }

    #[tokio::test]
    async fn test_malformed_date_is_bad_request() {
        let (status, _) = get("/api/chart?metal=Gold&start_date=01/02/2018").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_options() {
        let (status, body) = get("/api/options").await;
        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["metals"].as_array().unwrap().len(), 7);
        assert_eq!(json["default_metal"], "Gold");
        assert_eq!(json["min_date"], "2018-01-01");
        assert_eq!(json["max_date"], "2018-01-03");
    }

    #[tokio::test]
    async fn test_index_serves_dashboard() {
        let (status, body) = get("/").await;
        assert_eq!(status, StatusCode::OK);
        let html = String::from_utf8(body).unwrap();
        assert!(html.contains("metal-filter"));
        assert!(html.contains("/api/chart.svg"));
    }

    #[tokio::test]
    async fn test_chart_svg() {
        let (status, content_type, body) = get_with_type("/api/chart.svg?metal=Gold").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(content_type.as_deref(), Some("image/svg+xml"));
        let svg = String::from_utf8(body).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Precious Metal Prices 2018-2021"));
    }

    #[tokio::test]
    async fn test_chart_svg_size_is_clamped() {
        let (status, body) = get("/api/chart.svg?metal=Gold&width=10&height=99999").await;
        assert_eq!(status, StatusCode::OK);
        let svg = String::from_utf8(body).unwrap();
        assert!(svg.contains(r#"width="200""#));
        assert!(svg.contains(r#"height="4000""#));
    }

    #[tokio::test]
    async fn test_chart_svg_unknown_metal_is_bad_request() {
        let (status, body) = get("/api/chart.svg?metal=Copper").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(String::from_utf8(body).unwrap().contains("Unknown metal"));
    }
}
