use super::model::{LaunchRecord, PayloadRange, SiteSelector};

// ---------------------------------------------------------------------------
// Record predicates
// ---------------------------------------------------------------------------

/// Return the records launched from `site` whose payload lies in `range`.
///
/// * `SiteSelector::All` applies no site constraint.
/// * A site that matches nothing yields an empty result rather than an error.
/// * `range.low > range.high` yields an empty result.
///
/// Input order is preserved and records are borrowed, never copied.
pub fn filter_by_site_and_payload<'a>(
    records: &'a [LaunchRecord],
    site: &SiteSelector,
    range: PayloadRange,
) -> Vec<&'a LaunchRecord> {
    records
        .iter()
        .filter(|r| range.contains(r.payload_mass_kg) && site.matches(&r.launch_site))
        .collect()
}

/// Site restriction only; the payload range is not consulted.
pub fn records_for_site<'a>(
    records: &'a [LaunchRecord],
    site: &SiteSelector,
) -> Vec<&'a LaunchRecord> {
    records.iter().filter(|r| site.matches(&r.launch_site)).collect()
}

/// Records with `class == 1`.
pub fn successful_records(records: &[LaunchRecord]) -> impl Iterator<Item = &LaunchRecord> {
    records.iter().filter(|r| r.outcome_class.is_success())
}
