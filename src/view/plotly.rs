//! `ChartSpec` → Plotly.js figure JSON (`{ data, layout }`), mirroring what
//! `plotly.express` emits for the same pie and scatter calls.

use serde_json::{json, Value as JsonValue};

use super::{ChartSpec, PieChart, ScatterChart};

pub fn figure(spec: &ChartSpec) -> JsonValue {
    match spec {
        ChartSpec::Pie(pie) => pie_figure(pie),
        ChartSpec::Scatter(scatter) => scatter_figure(scatter),
    }
}

fn pie_figure(pie: &PieChart) -> JsonValue {
    let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
    let values: Vec<u64> = pie.slices.iter().map(|s| s.value).collect();
    json!({
        "data": [{
            "type": "pie",
            "labels": labels,
            "values": values,
        }],
        "layout": {
            "title": { "text": pie.title },
        },
    })
}

fn scatter_figure(chart: &ScatterChart) -> JsonValue {
    let hover_lines: String = chart
        .hover_fields
        .iter()
        .enumerate()
        .map(|(i, field)| format!("<br>{}=%{{customdata[{i}]}}", field.label()))
        .collect();

    let traces: Vec<JsonValue> = chart
        .series
        .iter()
        .map(|series| {
            let x: Vec<f64> = series.points.iter().map(|p| p.payload_mass_kg).collect();
            let y: Vec<u8> = series.points.iter().map(|p| p.outcome_class).collect();
            let customdata: Vec<&Vec<String>> = series.points.iter().map(|p| &p.hover).collect();
            json!({
                "type": "scatter",
                "mode": "markers",
                "name": series.category,
                "legendgroup": series.category,
                "x": x,
                "y": y,
                "customdata": customdata,
                "hovertemplate": format!(
                    "{}={}<br>{}=%{{x}}<br>{}=%{{y}}{hover_lines}<extra></extra>",
                    chart.color_label, series.category, chart.x_label, chart.y_label
                ),
            })
        })
        .collect();

    json!({
        "data": traces,
        "layout": {
            "title": { "text": chart.title },
            "xaxis": { "title": { "text": chart.x_label } },
            "yaxis": { "title": { "text": chart.y_label } },
            "legend": { "title": { "text": chart.color_label } },
        },
    })
}
