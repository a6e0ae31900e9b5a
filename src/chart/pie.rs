use crate::color::{generate_palette, Rgb};
use crate::data::filter::filter_by_site;
use crate::data::model::{LaunchRecord, Outcome, SiteSelection};

use super::{PieChartSpec, PieSlice, TextInfo};

const TRANSITION_MS: u32 = 500;

/// Proportional outcome chart.
///
/// * `SiteSelection::All` – successful launches grouped by site, one slice
///   per distinct site in `records` (first-appearance order).
/// * `SiteSelection::Site` – failure vs. success counts for that site, one
///   slice per class present, failure red and success green.
///
/// The payload range never feeds into this chart; callers pass the full
/// record set.
pub fn outcome_proportion_chart(records: &[LaunchRecord], site: &SiteSelection) -> PieChartSpec {
    let (title, counts) = match site {
        SiteSelection::All => (
            "Total Success Launches for All Sites".to_string(),
            successes_by_site(records),
        ),
        SiteSelection::Site(name) => (
            format!("Success Launches for {name}"),
            class_distribution(&filter_by_site(records, site)),
        ),
    };

    let total: usize = counts.iter().map(|(_, count, _)| count).sum();
    let slices = counts
        .into_iter()
        .map(|(label, count, color)| PieSlice {
            label,
            count,
            percent: if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            },
            color,
        })
        .collect();

    PieChartSpec {
        title,
        slices,
        text_info: TextInfo::PercentAndLabel,
        transition_ms: TRANSITION_MS,
    }
}

fn successes_by_site(records: &[LaunchRecord]) -> Vec<(String, usize, Rgb)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for rec in records {
        let hit = usize::from(rec.is_success());
        match counts.iter_mut().find(|(site, _)| *site == rec.launch_site) {
            Some((_, n)) => *n += hit,
            None => counts.push((rec.launch_site.clone(), hit)),
        }
    }

    let palette = generate_palette(counts.len());
    counts
        .into_iter()
        .zip(palette)
        .map(|((site, n), color)| (site, n, color))
        .collect()
}

fn class_distribution(records: &[&LaunchRecord]) -> Vec<(String, usize, Rgb)> {
    let failures = records.iter().filter(|r| !r.is_success()).count();
    let successes = records.len() - failures;

    [
        (Outcome::Failure, failures, Rgb::RED),
        (Outcome::Success, successes, Rgb::GREEN),
    ]
    .into_iter()
    .filter(|(_, n, _)| *n > 0)
    .map(|(outcome, n, color)| (outcome.label().to_string(), n, color))
    .collect()
}
