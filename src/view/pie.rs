use std::collections::BTreeMap;

use super::{PieChart, PieSlice};
use crate::data::filter::{records_for_site, successful_records};
use crate::data::model::{LaunchDataset, OutcomeClass, SiteSelector};

/// Success distribution for the pie chart.
///
/// * `All` → one slice per site, valued by its successful launches.
/// * `Site(s)` → one slice per outcome class present at `s`, valued by
///   launch count. The payload slider does not affect this chart.
pub fn build_success_distribution(dataset: &LaunchDataset, site: &SiteSelector) -> PieChart {
    match site {
        SiteSelector::All => {
            let mut per_site: BTreeMap<&str, u64> = BTreeMap::new();
            for rec in successful_records(dataset.records()) {
                *per_site.entry(rec.launch_site.as_str()).or_default() += 1;
            }
            PieChart {
                title: "Total Success Launches by Site".to_string(),
                slices: per_site
                    .into_iter()
                    .map(|(site, value)| PieSlice {
                        label: site.to_string(),
                        value,
                    })
                    .collect(),
            }
        }
        SiteSelector::Site(name) => {
            let mut per_class: BTreeMap<OutcomeClass, u64> = BTreeMap::new();
            for rec in records_for_site(dataset.records(), site) {
                *per_class.entry(rec.outcome_class).or_default() += 1;
            }
            PieChart {
                title: format!("Total Success Launches for {name}"),
                slices: per_class
                    .into_iter()
                    .map(|(class, value)| PieSlice {
                        label: class.to_string(),
                        value,
                    })
                    .collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_dataset;

    #[test]
    fn all_sites_slices_sum_to_total_successes() {
        let ds = sample_dataset();
        let pie = build_success_distribution(&ds, &SiteSelector::All);

        assert_eq!(pie.title, "Total Success Launches by Site");
        let labels: Vec<&str> = pie.slices.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"]
        );
        let values: Vec<u64> = pie.slices.iter().map(|s| s.value).collect();
        assert_eq!(values, vec![1, 2, 2, 2]);
        assert_eq!(pie.total(), successful_records(ds.records()).count() as u64);
    }

    #[test]
    fn single_site_has_one_slice_per_class() {
        let ds = sample_dataset();
        let pie = build_success_distribution(&ds, &SiteSelector::site("CCAFS LC-40"));

        assert_eq!(pie.title, "Total Success Launches for CCAFS LC-40");
        assert_eq!(
            pie.slices,
            vec![
                PieSlice { label: "0".into(), value: 3 },
                PieSlice { label: "1".into(), value: 1 },
            ]
        );
        assert_eq!(pie.total(), 4);
    }

    #[test]
    fn site_with_only_successes_has_single_slice() {
        let ds = sample_dataset();
        let pie = build_success_distribution(&ds, &SiteSelector::site("CCAFS SLC-40"));
        assert_eq!(pie.slices, vec![PieSlice { label: "1".into(), value: 2 }]);
    }

    #[test]
    fn unknown_site_gives_empty_pie() {
        let ds = sample_dataset();
        let pie = build_success_distribution(&ds, &SiteSelector::site("CCAFS LC-41"));
        assert_eq!(pie.title, "Total Success Launches for CCAFS LC-41");
        assert!(pie.slices.is_empty());
        assert_eq!(pie.total(), 0);
    }

    #[test]
    fn repeated_builds_are_identical() {
        let ds = sample_dataset();
        for site in [SiteSelector::All, SiteSelector::site("KSC LC-39A")] {
            assert_eq!(
                build_success_distribution(&ds, &site),
                build_success_distribution(&ds, &site)
            );
        }
    }
}
