// Static SVG chart rendering with plotters
use crate::domain::chart::{ChartPanel, LongFormPoint, PanelState, SeriesLegend};
use crate::domain::error::DashboardError;
use chrono::{Duration, NaiveDateTime};
use plotters::prelude::*;

const CHART_SIZE: (u32, u32) = (640, 320);
const LINE_WIDTH: u32 = 2;
const POINT_RADIUS: u32 = 3;

fn render_error<E: std::fmt::Display>(e: E) -> DashboardError {
    DashboardError::Render(e.to_string())
}

/// "#1f77b4" -> RGBColor; anything else is `None`.
fn parse_hex(color: &str) -> Option<RGBColor> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Contiguous non-null runs of one series as (day offset, percent) pairs.
/// Nulls split the line instead of being drawn as zero.
fn runs(points: &[&LongFormPoint], origin: NaiveDateTime) -> Vec<Vec<(f64, f64)>> {
    let mut runs = Vec::new();
    let mut current = Vec::new();
    for point in points {
        match point.value {
            Some(value) => current.push((day_offset(point.date, origin), value)),
            None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
            None => {}
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

fn palette_color(index: usize) -> RGBColor {
    let (r, g, b) = Palette99::pick(index).rgb();
    RGBColor(r, g, b)
}

fn day_offset(date: NaiveDateTime, origin: NaiveDateTime) -> f64 {
    (date - origin).num_seconds() as f64 / 86_400.0
}

fn padded_range(min: f64, max: f64) -> std::ops::Range<f64> {
    let padding = if (max - min).abs() < 1e-6 { 1.0 } else { (max - min) * 0.1 };
    (min - padding)..(max + padding)
}

/// Render one panel to an SVG document. Empty panels render their message.
pub fn render_svg(panel: &ChartPanel) -> Result<String, DashboardError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, CHART_SIZE).into_drawing_area();
        root.fill(&WHITE).map_err(render_error)?;

        match &panel.state {
            PanelState::Ready { legend, points } => draw_lines(&root, &panel.title, legend, points)?,
            empty => {
                let area = root
                    .titled(&panel.title, ("sans-serif", 18))
                    .map_err(render_error)?;
                let (width, height) = area.dim_in_pixel();
                let message = empty.empty_message().unwrap_or_default();
                area.draw(&Text::new(
                    message,
                    (width as i32 / 2 - 140, height as i32 / 2),
                    ("sans-serif", 16).into_font().color(&RGBColor(110, 110, 110)),
                ))
                .map_err(render_error)?;
            }
        }

        root.present().map_err(render_error)?;
    }
    Ok(svg)
}

fn draw_lines(
    root: &DrawingArea<SVGBackend<'_>, plotters::coord::Shift>,
    title: &str,
    legend: &[SeriesLegend],
    points: &[LongFormPoint],
) -> Result<(), DashboardError> {
    let dates = points.iter().map(|p| p.date);
    let (Some(origin), Some(latest)) = (dates.clone().min(), dates.max()) else {
        return Ok(());
    };
    let values = points.iter().filter_map(|p| p.value);
    let (Some(min), Some(max)) = (values.clone().reduce(f64::min), values.reduce(f64::max)) else {
        return Ok(());
    };

    let x_max = day_offset(latest, origin).max(1.0);
    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..x_max, padded_range(min, max))
        .map_err(render_error)?;

    let x_formatter = |x: &f64| {
        (origin + Duration::seconds((x * 86_400.0) as i64))
            .format("%m-%d")
            .to_string()
    };
    let y_formatter = |y: &f64| format!("{y:.1}%");
    chart
        .configure_mesh()
        .x_desc("DATE")
        .y_desc("Availability (%)")
        .x_labels(8)
        .y_labels(6)
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .light_line_style(&WHITE.mix(0.7))
        .draw()
        .map_err(render_error)?;

    for (i, series) in legend.iter().enumerate() {
        let color = series
            .color
            .as_deref()
            .and_then(parse_hex)
            .unwrap_or_else(|| palette_color(i));
        let own: Vec<&LongFormPoint> = points.iter().filter(|p| p.series == series.name).collect();

        for (run_index, run) in runs(&own, origin).into_iter().enumerate() {
            // A lone reading has no segment to draw.
            let drawn = if run.len() == 1 {
                chart.draw_series(
                    run.into_iter()
                        .map(|point| Circle::new(point, POINT_RADIUS, color.filled())),
                )
            } else {
                chart.draw_series(LineSeries::new(run, color.stroke_width(LINE_WIDTH)))
            }
            .map_err(render_error)?;
            if run_index == 0 {
                drawn.label(series.name.as_str()).legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(LINE_WIDTH))
                });
            }
        }
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerLeft)
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .label_font(("sans-serif", 11))
        .draw()
        .map_err(render_error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Program, SeriesSelector, Technology};
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 4, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn point(d: u32, value: Option<f64>) -> LongFormPoint {
        LongFormPoint {
            date: day(d),
            series: "2G JAVA".to_string(),
            region: "JAVA".to_string(),
            color: Some("#ff7f0e".to_string()),
            value,
        }
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#1f77b4"), Some(RGBColor(0x1f, 0x77, 0xb4)));
        assert_eq!(parse_hex("1f77b4"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn test_nulls_split_runs() {
        let points = [
            point(1, Some(99.0)),
            point(2, None),
            point(3, Some(98.0)),
            point(4, Some(97.0)),
        ];
        let refs: Vec<&LongFormPoint> = points.iter().collect();
        let runs = runs(&refs, day(1));
        assert_eq!(runs, vec![vec![(0.0, 99.0)], vec![(2.0, 98.0), (3.0, 97.0)]]);
    }

    #[test]
    fn test_render_ready_panel() {
        let selector = SeriesSelector::new(Technology::TwoG, Program::Normal);
        let panel = ChartPanel::new(
            selector,
            PanelState::Ready {
                legend: vec![SeriesLegend {
                    name: "2G JAVA".to_string(),
                    region: "JAVA".to_string(),
                    color: Some("#ff7f0e".to_string()),
                }],
                points: vec![point(1, Some(99.0)), point(2, Some(98.5))],
            },
        );
        let svg = render_svg(&panel).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("2G - Normal"));
        assert!(svg.contains("polyline"));
    }

    #[test]
    fn test_isolated_readings_are_drawn_as_markers() {
        let panel = ChartPanel::new(
            SeriesSelector::new(Technology::TwoG, Program::Normal),
            PanelState::Ready {
                legend: vec![SeriesLegend {
                    name: "2G JAVA".to_string(),
                    region: "JAVA".to_string(),
                    color: Some("#ff7f0e".to_string()),
                }],
                points: vec![
                    point(1, Some(99.0)),
                    point(2, None),
                    point(3, Some(98.0)),
                    point(4, None),
                ],
            },
        );
        let svg = render_svg(&panel).unwrap();
        assert_eq!(svg.matches("<circle").count(), 2);
    }

    #[test]
    fn test_render_empty_panel_shows_message() {
        let panel = ChartPanel::new(
            SeriesSelector::new(Technology::FourG, Program::Sp),
            PanelState::NoColumns,
        );
        let svg = render_svg(&panel).unwrap();
        assert!(svg.contains("No data for this combination"));
    }
}
