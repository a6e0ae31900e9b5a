use crate::controller::{
    Controller, DashboardContext, InputChange, Inputs, OutputId, RegionContent,
};
use crate::data::model::ALL_SITES;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, palette and slider bounds. Never mutated.
    pub context: DashboardContext,

    /// Holds the latest chart content of every region.
    pub controller: Controller,

    /// Widget-side values. Compared against the controller's inputs every
    /// frame; a difference is dispatched as an input change.
    pub site_choice: String,
    pub payload_low: f64,
    pub payload_high: f64,

    /// Search text typed into the site dropdown.
    pub site_query: String,
}

/// Display text for a dropdown value.
pub fn site_label(value: &str) -> &str {
    if value == ALL_SITES {
        "All Sites"
    } else {
        value
    }
}

/// Dropdown values ("ALL" first, then `sites` in order) whose label
/// contains `query`, ignoring case. An empty query keeps every option.
pub fn matching_sites<'a>(sites: &'a [String], query: &str) -> Vec<&'a str> {
    let needle = query.trim().to_lowercase();
    std::iter::once(ALL_SITES)
        .chain(sites.iter().map(String::as_str))
        .filter(|value| site_label(value).to_lowercase().contains(&needle))
        .collect()
}

impl AppState {
    pub fn new(context: DashboardContext, initial: Inputs) -> Self {
        let controller = Controller::new(&context, initial.clone());
        Self {
            context,
            controller,
            site_choice: initial.site,
            payload_low: initial.payload[0],
            payload_high: initial.payload[1],
            site_query: String::new(),
        }
    }

    /// Push widget values that differ from the controller's inputs.
    pub fn sync_inputs(&mut self) {
        // The two slider handles cannot cross.
        if self.payload_low > self.payload_high {
            std::mem::swap(&mut self.payload_low, &mut self.payload_high);
        }

        let current = self.controller.inputs().clone();
        if self.site_choice != current.site {
            let change = InputChange::Site(self.site_choice.clone());
            self.controller.apply(&self.context, change);
        }
        let payload = [self.payload_low, self.payload_high];
        if payload != current.payload {
            self.controller.apply(&self.context, InputChange::Payload(payload));
        }
    }

    pub fn region(&self, output: OutputId) -> Option<&RegionContent> {
        self.controller.region(output)
    }

    /// Number of launches currently plotted in the scatter region.
    pub fn visible_launches(&self) -> Option<usize> {
        match self.region(OutputId::PayloadScatterChart)? {
            Ok(crate::chart::ChartSpec::Scatter(s)) => Some(s.point_count()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliderConfig;
    use crate::data::model::{LaunchDataset, LaunchRecord, Outcome};

    fn state() -> AppState {
        let records = vec![
            LaunchRecord::new("A", 2000.0, Outcome::Success, "v1").unwrap(),
            LaunchRecord::new("B", 8000.0, Outcome::Failure, "v2").unwrap(),
        ];
        let dataset = LaunchDataset::from_records(records);
        let ctx = DashboardContext::new(dataset, SliderConfig::default());
        let initial = ctx.default_inputs();
        AppState::new(ctx, initial)
    }

    #[test]
    fn widget_changes_reach_the_controller() {
        let mut s = state();
        assert_eq!(s.visible_launches(), Some(2));

        s.site_choice = "B".to_string();
        s.sync_inputs();
        assert_eq!(s.controller.inputs().site, "B");
        assert_eq!(s.visible_launches(), Some(1));

        s.payload_low = 9000.0;
        s.sync_inputs();
        assert_eq!(s.visible_launches(), Some(0));
    }

    #[test]
    fn crossed_handles_are_swapped() {
        let mut s = state();
        s.payload_low = 7000.0;
        s.payload_high = 3000.0;
        s.sync_inputs();
        assert_eq!(s.controller.inputs().payload, [3000.0, 7000.0]);
    }

    #[test]
    fn site_search_filters_dropdown_options() {
        let sites = vec![
            "CCAFS LC-40".to_string(),
            "VAFB SLC-4E".to_string(),
            "KSC LC-39A".to_string(),
            "CCAFS SLC-40".to_string(),
        ];
        assert_eq!(matching_sites(&sites, "").len(), 5);
        assert_eq!(
            matching_sites(&sites, "ccafs"),
            vec!["CCAFS LC-40", "CCAFS SLC-40"]
        );
        assert_eq!(matching_sites(&sites, " slc "), vec!["VAFB SLC-4E", "CCAFS SLC-40"]);
        assert_eq!(matching_sites(&sites, "all"), vec![ALL_SITES]);
        assert!(matching_sites(&sites, "Boca Chica").is_empty());
    }
}
