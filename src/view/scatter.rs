use super::{HoverField, ScatterChart, ScatterPoint, ScatterSeries};
use crate::data::filter::filter_by_site_and_payload;
use crate::data::model::{
    LaunchDataset, LaunchRecord, PayloadRange, SiteSelector, COL_BOOSTER_CATEGORY, COL_CLASS,
    COL_PAYLOAD_MASS,
};

/// Payload vs. outcome scatter for the current site and payload range.
///
/// Points are grouped by booster version category, series in order of first
/// appearance. Hovering shows the launch site when every site is selected
/// and the booster version for a single site.
pub fn build_payload_correlation(
    dataset: &LaunchDataset,
    site: &SiteSelector,
    range: PayloadRange,
) -> ScatterChart {
    let (title, hover_field) = match site {
        SiteSelector::All => (
            "Correlation between Payload and Success for All Sites".to_string(),
            HoverField::LaunchSite,
        ),
        SiteSelector::Site(name) => (
            format!("Correlation between Payload and Success for {name}"),
            HoverField::BoosterVersion,
        ),
    };

    let mut series: Vec<ScatterSeries> = Vec::new();
    for rec in filter_by_site_and_payload(dataset.records(), site, range) {
        let point = ScatterPoint {
            payload_mass_kg: rec.payload_mass_kg,
            outcome_class: rec.outcome_class.code(),
            hover: vec![hover_value(rec, hover_field)],
        };
        match series
            .iter_mut()
            .find(|s| s.category == rec.booster_version_category)
        {
            Some(s) => s.points.push(point),
            None => series.push(ScatterSeries {
                category: rec.booster_version_category.clone(),
                points: vec![point],
            }),
        }
    }

    ScatterChart {
        title,
        x_label: COL_PAYLOAD_MASS.to_string(),
        y_label: COL_CLASS.to_string(),
        color_label: COL_BOOSTER_CATEGORY.to_string(),
        hover_fields: vec![hover_field],
        series,
    }
}

fn hover_value(rec: &LaunchRecord, field: HoverField) -> String {
    match field {
        HoverField::LaunchSite => rec.launch_site.clone(),
        HoverField::BoosterVersion => rec.booster_version.clone(),
    }
}
