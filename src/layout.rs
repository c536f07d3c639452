//! Static description of the dashboard widgets, shared by the native window
//! and the web page.

use serde::Serialize;

use crate::data::model::{
    LaunchDataset, PayloadRange, SiteSelector, ALL_SITES, KNOWN_SITES, SLIDER_MAX, SLIDER_MIN,
    SLIDER_STEP,
};

pub const HEADING: &str = "SpaceX Launch Records Dashboard";

pub const SITE_DROPDOWN_ID: &str = "site-dropdown";
pub const PAYLOAD_SLIDER_ID: &str = "payload-slider";
pub const SUCCESS_PIE_CHART_ID: &str = "success-pie-chart";
pub const SUCCESS_PAYLOAD_SCATTER_CHART_ID: &str = "success-payload-scatter-chart";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dropdown {
    pub id: &'static str,
    pub options: Vec<DropdownOption>,
    pub value: String,
    pub placeholder: &'static str,
    pub searchable: bool,
}

impl Dropdown {
    /// Label shown for a dropdown value; values outside the option list
    /// are shown verbatim.
    pub fn label_for<'a>(&'a self, value: &'a str) -> &'a str {
        self.options
            .iter()
            .find(|o| o.value == value)
            .map_or(value, |o| o.label.as_str())
    }

    /// Options whose label or value contains `query`, ignoring case. A blank
    /// query, or a dropdown that is not searchable, keeps every option.
    pub fn matching<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a DropdownOption> + 'a {
        let needle = if self.searchable {
            query.trim().to_lowercase()
        } else {
            String::new()
        };
        self.options.iter().filter(move |o| {
            needle.is_empty()
                || o.label.to_lowercase().contains(&needle)
                || o.value.to_lowercase().contains(&needle)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSlider {
    pub id: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub marks: Vec<f64>,
    pub value: [f64; 2],
}

impl RangeSlider {
    pub fn default_range(&self) -> PayloadRange {
        PayloadRange::new(self.value[0], self.value[1])
    }

    /// Tick labels, one per mark, in kg.
    pub fn mark_labels(&self) -> Vec<String> {
        self.marks.iter().map(|m| format!("{m:.0}")).collect()
    }

    /// Whether every observed payload is reachable with the fixed bounds.
    /// Logs a warning when it is not; the bounds are left as declared.
    pub fn covers(&self, dataset: &LaunchDataset) -> bool {
        match dataset.payload_bounds() {
            Some((min, max)) if min < self.min || max > self.max => {
                log::warn!(
                    "payload data spans {min}..={max} kg but the slider only covers {}..={}",
                    self.min,
                    self.max
                );
                false
            }
            _ => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardLayout {
    pub heading: &'static str,
    pub site_dropdown: Dropdown,
    pub payload_slider: RangeSlider,
    pub pie_chart_id: &'static str,
    pub scatter_chart_id: &'static str,
}

impl DashboardLayout {
    pub fn default_site(&self) -> SiteSelector {
        // Infallible.
        self.site_dropdown.value.parse().unwrap_or_default()
    }
}

impl Default for DashboardLayout {
    fn default() -> Self {
        let options = std::iter::once(DropdownOption {
            label: "All Sites".to_string(),
            value: ALL_SITES.to_string(),
        })
        .chain(KNOWN_SITES.iter().map(|site| DropdownOption {
            label: site.to_string(),
            value: site.to_string(),
        }))
        .collect();

        let steps = ((SLIDER_MAX - SLIDER_MIN) / SLIDER_STEP).round() as usize;
        let marks = (0..=steps)
            .map(|i| SLIDER_MIN + i as f64 * SLIDER_STEP)
            .collect();

        DashboardLayout {
            heading: HEADING,
            site_dropdown: Dropdown {
                id: SITE_DROPDOWN_ID,
                options,
                value: ALL_SITES.to_string(),
                placeholder: "Select a Launch Site here",
                searchable: true,
            },
            payload_slider: RangeSlider {
                id: PAYLOAD_SLIDER_ID,
                min: SLIDER_MIN,
                max: SLIDER_MAX,
                step: SLIDER_STEP,
                marks,
                value: [SLIDER_MIN, SLIDER_MAX],
            },
            pie_chart_id: SUCCESS_PIE_CHART_ID,
            scatter_chart_id: SUCCESS_PAYLOAD_SCATTER_CHART_ID,
        }
    }
}
