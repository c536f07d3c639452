use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use spacex_dash::view::{PieChart, ScatterChart};

use crate::color::ColorMap;

const CHART_HEIGHT: f32 = 340.0;

/// Largest arc drawn as a single polygon; keeps every piece convex.
const MAX_WEDGE_ARC: f64 = FRAC_PI_2 / 2.0;

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Render a pie chart as filled polygons, clockwise from 12 o'clock.
pub fn pie_chart(ui: &mut Ui, id: &str, pie: &PieChart) {
    ui.heading(&pie.title);

    let total = pie.total();
    if total == 0 {
        ui.label("No launches match the current selection.");
    }

    let colors = ColorMap::new(pie.slices.iter().map(|s| s.label.as_str()));

    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.1)
        .include_y(1.1)
        .label_formatter(|name, _| name.to_string())
        .show(ui, |plot_ui| {
            if total == 0 {
                return;
            }
            let mut start = FRAC_PI_2;
            for slice in &pie.slices {
                let fraction = slice.value as f64 / total as f64;
                let sweep = fraction * TAU;
                let color = colors.color_for(&slice.label);

                for wedge in wedge_polygons(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::from(wedge))
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, Color32::WHITE)),
                    );
                }

                let mid = start - sweep / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    format!("{:.1}%", fraction * 100.0),
                ));

                start -= sweep;
            }
        });
}

/// Split an arc of the unit circle into convex wedges anchored at the centre.
fn wedge_polygons(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let pieces = (sweep / MAX_WEDGE_ARC).ceil().max(1.0) as usize;
    let step = sweep / pieces as f64;

    (0..pieces)
        .map(|p| {
            let a0 = start - p as f64 * step;
            let segments = 8;
            let mut pts = vec![[0.0, 0.0]];
            pts.extend((0..=segments).map(|s| {
                let a = a0 - step * s as f64 / segments as f64;
                [a.cos(), a.sin()]
            }));
            pts
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render payload (x) against outcome class (y), one coloured series per
/// booster category. Hovering a point lists its hover fields.
pub fn scatter_chart(ui: &mut Ui, id: &str, chart: &ScatterChart, colors: &ColorMap) {
    ui.heading(&chart.title);
    if chart.series.is_empty() {
        ui.label("No launches match the current selection.");
    }

    Plot::new(id)
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| hover_label(chart, name, value))
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let points: PlotPoints = series
                    .points
                    .iter()
                    .map(|p| [p.payload_mass_kg, p.outcome_class as f64])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(&series.category)
                        .color(colors.color_for(&series.category))
                        .radius(4.0)
                        .filled(true),
                );
            }
        });
}

/// Tooltip text for the point of series `name` closest to `value`.
fn hover_label(chart: &ScatterChart, name: &str, value: &PlotPoint) -> String {
    let nearest = chart
        .series
        .iter()
        .find(|s| s.category == name)
        .and_then(|s| {
            s.points.iter().min_by(|a, b| {
                let da = (a.payload_mass_kg - value.x).abs() + (a.outcome_class as f64 - value.y).abs();
                let db = (b.payload_mass_kg - value.x).abs() + (b.outcome_class as f64 - value.y).abs();
                da.total_cmp(&db)
            })
        });

    let Some(point) = nearest else {
        return format!("{}={:.0}\n{}={:.2}", chart.x_label, value.x, chart.y_label, value.y);
    };

    let mut text = format!(
        "{}={name}\n{}={}\n{}={}",
        chart.color_label, chart.x_label, point.payload_mass_kg, chart.y_label, point.outcome_class
    );
    for (label, v) in chart.hover_entries(point) {
        text.push_str(&format!("\n{label}={v}"));
    }
    text
}
