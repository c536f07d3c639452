//! Chart specifications derived from a filtered launch subset.
//!
//! Builders are pure: they read the dataset and the current selections and
//! return a value describing the chart. Rendering is left to the egui
//! widgets in the binary and to Plotly.js on the web page.

use serde::Serialize;

use crate::data::model::{COL_BOOSTER_VERSION, COL_LAUNCH_SITE};

pub mod pie;
pub mod plotly;
pub mod scatter;

pub use pie::build_success_distribution;
pub use scatter::build_payload_correlation;

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    /// Sum of all slice values.
    pub fn total(&self) -> u64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// Extra column shown when hovering a scatter point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HoverField {
    #[serde(rename = "Launch Site")]
    LaunchSite,
    #[serde(rename = "Booster Version")]
    BoosterVersion,
}

impl HoverField {
    pub fn label(self) -> &'static str {
        match self {
            HoverField::LaunchSite => COL_LAUNCH_SITE,
            HoverField::BoosterVersion => COL_BOOSTER_VERSION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub payload_mass_kg: f64,
    pub outcome_class: u8,
    /// Values for the chart's `hover_fields`, same order.
    pub hover: Vec<String>,
}

/// All points sharing one booster version category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub category: String,
    pub points: Vec<ScatterPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Legend title for the colour grouping.
    pub color_label: String,
    pub hover_fields: Vec<HoverField>,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChart {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }

    /// The hover fields of one point paired with their labels.
    pub fn hover_entries<'a>(
        &'a self,
        point: &'a ScatterPoint,
    ) -> impl Iterator<Item = (&'static str, &'a str)> + 'a {
        self.hover_fields
            .iter()
            .zip(&point.hover)
            .map(|(field, value)| (field.label(), value.as_str()))
    }
}

// ---------------------------------------------------------------------------
// ChartSpec
// ---------------------------------------------------------------------------

/// What an output widget displays.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieChart),
    Scatter(ScatterChart),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(p) => &p.title,
            ChartSpec::Scatter(s) => &s.title,
        }
    }

    pub fn as_pie(&self) -> Option<&PieChart> {
        match self {
            ChartSpec::Pie(p) => Some(p),
            ChartSpec::Scatter(_) => None,
        }
    }

    pub fn as_scatter(&self) -> Option<&ScatterChart> {
        match self {
            ChartSpec::Scatter(s) => Some(s),
            ChartSpec::Pie(_) => None,
        }
    }
}

impl From<PieChart> for ChartSpec {
    fn from(p: PieChart) -> Self {
        ChartSpec::Pie(p)
    }
}

impl From<ScatterChart> for ChartSpec {
    fn from(s: ScatterChart) -> Self {
        ChartSpec::Scatter(s)
    }
}
