use std::collections::BTreeSet;
use std::fmt;

use crate::error::SelectionError;

/// Dropdown value that stands for "every launch site".
pub const ALL_SITES: &str = "ALL";

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome class: `0` is a failure, `1` a success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Numeric class value as stored in the source file.
    pub fn class(self) -> i64 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl TryFrom<i64> for Outcome {
    type Error = String;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Outcome::Failure),
            1 => Ok(Outcome::Success),
            other => Err(format!("outcome class must be 0 or 1, got {other}")),
        }
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the input table
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    pub launch_site: String,
    /// Always finite and non-negative.
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    pub booster_version_category: String,
}

impl LaunchRecord {
    /// Build a record, rejecting payloads that are negative or not finite.
    pub fn new(
        launch_site: impl Into<String>,
        payload_mass_kg: f64,
        outcome: Outcome,
        booster_version_category: impl Into<String>,
    ) -> Result<Self, String> {
        if !payload_mass_kg.is_finite() || payload_mass_kg < 0.0 {
            return Err(format!(
                "payload mass must be a non-negative number, got {payload_mass_kg}"
            ));
        }
        Ok(Self {
            launch_site: launch_site.into(),
            payload_mass_kg,
            outcome,
            booster_version_category: booster_version_category.into(),
        })
    }

    pub fn is_success(&self) -> bool {
        self.outcome == Outcome::Success
    }
}

// ---------------------------------------------------------------------------
// Selection values
// ---------------------------------------------------------------------------

/// A validated site selector value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SiteSelection {
    All,
    Site(String),
}

impl SiteSelection {
    pub fn is_all(&self) -> bool {
        matches!(self, SiteSelection::All)
    }

    /// Whether `record` belongs to this selection.
    pub fn matches(&self, record: &LaunchRecord) -> bool {
        match self {
            SiteSelection::All => true,
            SiteSelection::Site(site) => record.launch_site == *site,
        }
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteSelection::All => write!(f, "{ALL_SITES}"),
            SiteSelection::Site(site) => write!(f, "{site}"),
        }
    }
}

/// Inclusive payload interval `[low, high]` in kilograms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayloadRange {
    low: f64,
    high: f64,
}

impl PayloadRange {
    /// Validate `0 <= low <= high`, both finite.
    pub fn new(low: f64, high: f64) -> Result<Self, SelectionError> {
        if !low.is_finite() || !high.is_finite() || low < 0.0 || low > high {
            return Err(SelectionError::InvalidRange { low, high });
        }
        Ok(Self { low, high })
    }

    pub fn contains(&self, payload_mass_kg: f64) -> bool {
        self.low <= payload_mass_kg && payload_mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The full parsed dataset with indices computed once at load.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launches, in file order.
    pub records: Vec<LaunchRecord>,
    /// Distinct site names in order of first appearance.
    pub sites: Vec<String>,
    /// Distinct booster version categories, sorted.
    pub booster_categories: BTreeSet<String>,
    /// Smallest and largest payload seen (`None` when empty).
    pub payload_bounds: Option<(f64, f64)>,
}

impl LaunchDataset {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories = BTreeSet::new();
        let mut payload_bounds: Option<(f64, f64)> = None;

        for rec in &records {
            if !sites.iter().any(|s| *s == rec.launch_site) {
                sites.push(rec.launch_site.clone());
            }
            booster_categories.insert(rec.booster_version_category.clone());
            let mass = rec.payload_mass_kg;
            payload_bounds = Some(match payload_bounds {
                Some((min, max)) => (min.min(mass), max.max(mass)),
                None => (mass, mass),
            });
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
            payload_bounds,
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Validate a raw dropdown value against the sites discovered at load.
    pub fn resolve_site(&self, raw: &str) -> Result<SiteSelection, SelectionError> {
        if raw == ALL_SITES {
            return Ok(SiteSelection::All);
        }
        if self.sites.iter().any(|s| s == raw) {
            Ok(SiteSelection::Site(raw.to_string()))
        } else {
            Err(SelectionError::InvalidSite {
                site: raw.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(site: &str, mass: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord::new(site, mass, outcome, booster).unwrap()
    }

    #[test]
    fn outcome_accepts_only_binary_classes() {
        assert_eq!(Outcome::try_from(0i64), Ok(Outcome::Failure));
        assert_eq!(Outcome::try_from(1i64), Ok(Outcome::Success));
        assert!(Outcome::try_from(2i64).is_err());
        assert!(Outcome::try_from(-1i64).is_err());
    }

    #[test]
    fn record_rejects_negative_or_nan_payload() {
        assert!(LaunchRecord::new("A", -1.0, Outcome::Success, "v1").is_err());
        assert!(LaunchRecord::new("A", f64::NAN, Outcome::Success, "v1").is_err());
        assert!(LaunchRecord::new("A", 0.0, Outcome::Success, "v1").is_ok());
    }

    #[test]
    fn dataset_indexes_sites_in_first_seen_order() {
        let ds = LaunchDataset::from_records(vec![
            record("KSC LC-39A", 5000.0, Outcome::Success, "FT"),
            record("CCAFS LC-40", 0.0, Outcome::Failure, "v1.0"),
            record("KSC LC-39A", 9600.0, Outcome::Success, "B4"),
        ]);
        assert_eq!(ds.sites, vec!["KSC LC-39A", "CCAFS LC-40"]);
        assert_eq!(ds.booster_categories.len(), 3);
        assert_eq!(ds.payload_bounds, Some((0.0, 9600.0)));
    }

    #[test]
    fn resolve_site_rejects_unknown_values() {
        let ds = LaunchDataset::from_records(vec![record("A", 1.0, Outcome::Success, "v1")]);
        assert_eq!(ds.resolve_site("ALL").unwrap(), SiteSelection::All);
        assert_eq!(
            ds.resolve_site("A").unwrap(),
            SiteSelection::Site("A".to_string())
        );
        assert!(matches!(
            ds.resolve_site("Z"),
            Err(SelectionError::InvalidSite { .. })
        ));
        // Case matters: the dropdown only ever emits exact names.
        assert!(ds.resolve_site("all").is_err());
    }

    #[test]
    fn payload_range_validates_bounds() {
        assert!(PayloadRange::new(0.0, 10000.0).is_ok());
        assert!(PayloadRange::new(5000.0, 5000.0).is_ok());
        assert!(PayloadRange::new(6000.0, 5000.0).is_err());
        assert!(PayloadRange::new(-1.0, 5000.0).is_err());
        assert!(PayloadRange::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn empty_dataset_has_no_bounds() {
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.payload_bounds, None);
    }
}
