use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::debug;

use crate::config::ChartStyle;
use crate::data::PriceTable;
use crate::models::{ChartRequest, ChartSpec, FontSpec, Metal, PricePoint};
use crate::utils::{parse_color, ChartError};

pub const DEFAULT_WIDTH: u32 = 1000;
pub const DEFAULT_HEIGHT: u32 = 600;

/// Build the chart for a metal name and an inclusive date range
///
/// The metal name is validated; the range is not, so `start_date > end_date`
/// simply yields an empty series.
pub fn render(
    table: &PriceTable,
    style: &ChartStyle,
    metal: &str,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<ChartSpec, ChartError> {
    let metal: Metal = metal.parse()?;
    Ok(render_request(
        table,
        style,
        &ChartRequest {
            metal,
            start_date,
            end_date,
        },
    ))
}

/// Build the chart for an already validated request
pub fn render_request(table: &PriceTable, style: &ChartStyle, request: &ChartRequest) -> ChartSpec {
    let series: Vec<PricePoint> = table
        .records()
        .iter()
        .filter(|r| r.in_range(request.start_date, request.end_date))
        .filter_map(|r| {
            r.timestamp.map(|timestamp| PricePoint {
                timestamp,
                price: r.price(request.metal),
            })
        })
        .collect();

    debug!(
        "{} chart {}..={} has {} points",
        request.metal,
        request.start_date,
        request.end_date,
        series.len()
    );

    ChartSpec {
        title: style.title.to_string(),
        metal: request.metal,
        start_date: request.start_date,
        end_date: request.end_date,
        x_label: style.x_label.to_string(),
        y_label: style.y_label.to_string(),
        color: style.color_for(request.metal).to_string(),
        theme: style.theme,
        font: FontSpec {
            family: style.font_family.to_string(),
            size: style.font_size,
            color: style.font_color.to_string(),
        },
        series,
    }
}

fn to_utc(ts: NaiveDateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from_naive_utc_and_offset(ts, Utc)
}

/// Generic family plotters can resolve, taken from the end of a CSS font list
fn plotters_family(css_family: &str) -> &str {
    css_family
        .rsplit(',')
        .map(str::trim)
        .find(|f| !f.is_empty())
        .unwrap_or("sans-serif")
}

/// Split the series at missing prices so gaps are not bridged by a line
fn segments(series: &[PricePoint]) -> Vec<Vec<(DateTime<Utc>, f64)>> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    for point in series {
        match point.price {
            Some(price) => current.push((to_utc(point.timestamp), price)),
            None if !current.is_empty() => out.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

/// Padded y-axis range over all drawn prices; `0.0..1.0` when there are none
///
/// The lower bound is floored at zero only for non-negative data.
fn price_range(lines: &[Vec<(DateTime<Utc>, f64)>]) -> (f64, f64) {
    let prices = lines.iter().flatten().map(|(_, p)| *p);
    let min_price = prices.clone().fold(f64::INFINITY, f64::min);
    let max_price = prices.fold(f64::NEG_INFINITY, f64::max);
    if !(min_price.is_finite() && max_price.is_finite()) {
        return (0.0, 1.0);
    }

    // Add some padding to the price range
    let padding = (max_price - min_price).max(1e-8) * 0.1;
    let y_min = if min_price >= 0.0 {
        (min_price - padding).max(0.0)
    } else {
        min_price - padding
    };
    (y_min, max_price + padding)
}

/// Draw a chart as an SVG document
pub fn render_svg(spec: &ChartSpec, style: &ChartStyle, width: u32, height: u32) -> Result<String, ChartError> {
    let background = parse_color(style.background).unwrap_or(RGBColor(17, 17, 17));
    let font_color = parse_color(&spec.font.color).unwrap_or(WHITE);
    let line_color = parse_color(&spec.color)
        .or_else(|| parse_color(style.fallback_color))
        .unwrap_or(BLUE);
    let family = plotters_family(&spec.font.family);
    let font_size = spec.font.size as f64;

    let lines = segments(&spec.series);

    let (y_min, y_max) = price_range(&lines);

    // Time range comes from the data, or from the request when there is none
    let (mut x_min, mut x_max) = match (spec.series.first(), spec.series.last()) {
        (Some(first), Some(last)) => (to_utc(first.timestamp), to_utc(last.timestamp)),
        _ => {
            let lo = spec.start_date.min(spec.end_date);
            let hi = spec.start_date.max(spec.end_date);
            (
                to_utc(lo.and_hms_opt(0, 0, 0).unwrap_or_default()),
                to_utc(hi.and_hms_opt(23, 59, 59).unwrap_or_default()),
            )
        }
    };
    if x_min >= x_max {
        x_min -= Duration::hours(12);
        x_max += Duration::hours(12);
    }

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&background)
            .map_err(|e| ChartError::Render(format!("Failed to fill canvas: {}", e)))?;

        let caption_style = (family, font_size * 1.2).into_font().color(&font_color);
        let desc_style = (family, font_size).into_font().color(&font_color);
        let tick_style = (family, font_size * 0.7).into_font().color(&font_color);

        let mut chart = ChartBuilder::on(&root)
            .caption(&spec.title, caption_style)
            .margin(15)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(|e| ChartError::Render(format!("Failed to build chart: {}", e)))?;

        chart
            .configure_mesh()
            .x_desc(&spec.x_label)
            .y_desc(&spec.y_label)
            .x_labels(8)
            .x_label_formatter(&|dt: &DateTime<Utc>| dt.format("%Y-%m-%d").to_string())
            .axis_desc_style(desc_style)
            .label_style(tick_style)
            .axis_style(font_color.stroke_width(1))
            .bold_line_style(font_color.mix(0.15).stroke_width(1))
            .light_line_style(font_color.mix(0.05).stroke_width(1))
            .draw()
            .map_err(|e| ChartError::Render(format!("Failed to draw mesh: {}", e)))?;

        for line in &lines {
            if line.len() == 1 {
                chart
                    .draw_series(std::iter::once(Circle::new(line[0], 3, line_color.filled())))
                    .map_err(|e| ChartError::Render(format!("Failed to draw point: {}", e)))?;
            } else {
                chart
                    .draw_series(LineSeries::new(line.iter().copied(), line_color.stroke_width(2)))
                    .map_err(|e| ChartError::Render(format!("Failed to draw line: {}", e)))?;
            }
        }

        if lines.is_empty() {
            let note_style = (family, font_size)
                .into_font()
                .color(&font_color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            root.draw(&Text::new(
                "No data in selected range",
                (width as i32 / 2, height as i32 / 2),
                note_style,
            ))
            .map_err(|e| ChartError::Render(format!("Failed to draw label: {}", e)))?;
        }

        root.present()
            .map_err(|e| ChartError::Render(format!("Failed to render chart: {}", e)))?;
    }

    Ok(svg)
}
