use super::model::{LaunchRecord, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Typed predicates over launch records
// ---------------------------------------------------------------------------

/// Keep launches from the selected site. `SiteSelection::All` keeps every
/// record in its original order.
pub fn filter_by_site<'a, I>(records: I, site: &SiteSelection) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records.into_iter().filter(|rec| site.matches(rec)).collect()
}

/// Keep launches whose payload lies in the inclusive interval `range`.
/// An empty result is not an error.
pub fn filter_by_payload_range<'a, I>(records: I, range: &PayloadRange) -> Vec<&'a LaunchRecord>
where
    I: IntoIterator<Item = &'a LaunchRecord>,
{
    records
        .into_iter()
        .filter(|rec| range.contains(rec.payload_mass_kg))
        .collect()
}

/// Subset feeding the payload scatter chart: the range filter always
/// applies, the site filter only narrows when a single site is selected.
pub fn filter_launches<'a>(
    records: &'a [LaunchRecord],
    site: &SiteSelection,
    range: &PayloadRange,
) -> Vec<&'a LaunchRecord> {
    let in_range = filter_by_payload_range(records, range);
    if site.is_all() {
        in_range
    } else {
        filter_by_site(in_range, site)
    }
}
