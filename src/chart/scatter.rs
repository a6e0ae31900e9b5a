use std::collections::BTreeMap;

use crate::color::ColorMap;
use crate::data::model::{LaunchRecord, Outcome, SiteSelection};

use super::{Axis, AxisTick, ScatterChartSpec, ScatterSeries};

/// Outcome-vs-payload scatter chart: x = payload mass, y = outcome class,
/// one series per booster version category (sorted by name).
///
/// `records` is the already-filtered subset; `site` only picks the title.
pub fn outcome_vs_payload_chart(
    records: &[&LaunchRecord],
    site: &SiteSelection,
    booster_colors: &ColorMap,
) -> ScatterChartSpec {
    let title = match site {
        SiteSelection::All => "Launch Outcomes vs. Payload Mass for All Sites".to_string(),
        SiteSelection::Site(name) => format!("Launch Outcomes vs. Payload Mass for {name}"),
    };

    let mut by_booster: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for rec in records {
        by_booster
            .entry(rec.booster_version_category.as_str())
            .or_default()
            .push([rec.payload_mass_kg, rec.outcome.class() as f64]);
    }

    let series = by_booster
        .into_iter()
        .map(|(booster, points)| ScatterSeries {
            name: booster.to_string(),
            color: booster_colors.color_for(booster),
            points,
        })
        .collect();

    ScatterChartSpec {
        title,
        x_axis: Axis {
            title: "Payload Mass (kg)".to_string(),
            ticks: Vec::new(),
        },
        y_axis: Axis {
            title: "Launch Outcome".to_string(),
            ticks: [Outcome::Failure, Outcome::Success]
                .into_iter()
                .map(|o| AxisTick {
                    value: o.class() as f64,
                    label: o.label().to_string(),
                })
                .collect(),
        },
        legend_title: "Booster Version".to_string(),
        series,
    }
}
