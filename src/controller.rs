use std::collections::BTreeMap;
use std::fmt;

use crate::chart::{outcome_proportion_chart, outcome_vs_payload_chart, ChartSpec};
use crate::color::ColorMap;
use crate::config::SliderConfig;
use crate::data::filter::filter_launches;
use crate::data::model::{LaunchDataset, PayloadRange, ALL_SITES};
use crate::error::SelectionError;

// ---------------------------------------------------------------------------
// Immutable context shared by every recompute
// ---------------------------------------------------------------------------

/// Everything the charts are computed from. Built once in `main`, then only
/// ever borrowed.
#[derive(Debug, Clone)]
pub struct DashboardContext {
    pub dataset: LaunchDataset,
    /// Fixed per dataset so booster colours survive filter changes.
    pub booster_colors: ColorMap,
    pub slider: SliderConfig,
}

impl DashboardContext {
    pub fn new(dataset: LaunchDataset, slider: SliderConfig) -> Self {
        let booster_colors = ColorMap::new(&dataset.booster_categories);
        Self {
            dataset,
            booster_colors,
            slider,
        }
    }

    /// Selection the page opens with: every site, the full slider span.
    pub fn default_inputs(&self) -> Inputs {
        Inputs {
            site: ALL_SITES.to_string(),
            payload: [self.slider.min, self.slider.max],
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs, outputs, and their raw values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputId {
    SiteDropdown,
    PayloadSlider,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OutputId {
    SuccessPieChart,
    PayloadScatterChart,
}

impl OutputId {
    pub const ALL: [OutputId; 2] = [OutputId::SuccessPieChart, OutputId::PayloadScatterChart];

    /// Stable identifier, also used as the export file stem.
    pub fn id(self) -> &'static str {
        match self {
            OutputId::SuccessPieChart => "success-pie-chart",
            OutputId::PayloadScatterChart => "success-payload-scatter-chart",
        }
    }
}

impl fmt::Display for OutputId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Current raw control values, exactly as the widgets report them.
/// Validation happens per output so a bad value only blanks the charts
/// that depend on it.
#[derive(Debug, Clone, PartialEq)]
pub struct Inputs {
    pub site: String,
    pub payload: [f64; 2],
}

/// One control reporting a new value.
#[derive(Debug, Clone, PartialEq)]
pub enum InputChange {
    Site(String),
    Payload([f64; 2]),
}

impl InputChange {
    pub fn input_id(&self) -> InputId {
        match self {
            InputChange::Site(_) => InputId::SiteDropdown,
            InputChange::Payload(_) => InputId::PayloadSlider,
        }
    }
}

/// What a display region shows: a chart, or the reason it has none.
pub type RegionContent = Result<ChartSpec, SelectionError>;

type Recompute = fn(&DashboardContext, &Inputs) -> RegionContent;

// ---------------------------------------------------------------------------
// Dispatcher: input id → dependent outputs
// ---------------------------------------------------------------------------

struct Binding {
    output: OutputId,
    inputs: Vec<InputId>,
    recompute: Recompute,
}

/// Explicit dependency graph between controls and chart regions.
pub struct Dispatcher {
    bindings: Vec<Binding>,
}

impl Default for Dispatcher {
    /// The dashboard wiring: the pie chart follows the site dropdown only,
    /// the scatter chart follows both controls.
    fn default() -> Self {
        let mut dispatcher = Dispatcher::empty();
        dispatcher.bind(
            OutputId::SuccessPieChart,
            &[InputId::SiteDropdown],
            success_pie_chart,
        );
        dispatcher.bind(
            OutputId::PayloadScatterChart,
            &[InputId::SiteDropdown, InputId::PayloadSlider],
            payload_scatter_chart,
        );
        dispatcher
    }
}

impl Dispatcher {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Register `output`, recomputed by `recompute` whenever any of `inputs`
    /// changes. Rebinding an output replaces its previous binding.
    pub fn bind(&mut self, output: OutputId, inputs: &[InputId], recompute: Recompute) {
        self.bindings.retain(|b| b.output != output);
        self.bindings.push(Binding {
            output,
            inputs: inputs.to_vec(),
            recompute,
        });
    }

    /// Outputs that must be recomputed when `input` changes.
    pub fn dependents(&self, input: InputId) -> Vec<OutputId> {
        self.bindings
            .iter()
            .filter(|b| b.inputs.contains(&input))
            .map(|b| b.output)
            .collect()
    }

    pub fn outputs(&self) -> Vec<OutputId> {
        self.bindings.iter().map(|b| b.output).collect()
    }

    fn recompute(
        &self,
        output: OutputId,
        ctx: &DashboardContext,
        inputs: &Inputs,
    ) -> Option<RegionContent> {
        self.bindings
            .iter()
            .find(|b| b.output == output)
            .map(|b| (b.recompute)(ctx, inputs))
    }
}

// ---------------------------------------------------------------------------
// Recompute functions
// ---------------------------------------------------------------------------

fn success_pie_chart(ctx: &DashboardContext, inputs: &Inputs) -> RegionContent {
    let site = ctx.dataset.resolve_site(&inputs.site)?;
    Ok(ChartSpec::Pie(outcome_proportion_chart(
        &ctx.dataset.records,
        &site,
    )))
}

fn payload_scatter_chart(ctx: &DashboardContext, inputs: &Inputs) -> RegionContent {
    let site = ctx.dataset.resolve_site(&inputs.site)?;
    let range = PayloadRange::new(inputs.payload[0], inputs.payload[1])?;
    let subset = filter_launches(&ctx.dataset.records, &site, &range);
    Ok(ChartSpec::Scatter(outcome_vs_payload_chart(
        &subset,
        &site,
        &ctx.booster_colors,
    )))
}

// ---------------------------------------------------------------------------
// Controller: current inputs + latest content of every region
// ---------------------------------------------------------------------------

pub struct Controller {
    dispatcher: Dispatcher,
    inputs: Inputs,
    regions: BTreeMap<OutputId, RegionContent>,
}

impl Controller {
    /// Wire the default bindings and compute every region once.
    pub fn new(ctx: &DashboardContext, initial: Inputs) -> Self {
        Self::with_dispatcher(ctx, Dispatcher::default(), initial)
    }

    pub fn with_dispatcher(
        ctx: &DashboardContext,
        dispatcher: Dispatcher,
        initial: Inputs,
    ) -> Self {
        let mut controller = Self {
            dispatcher,
            inputs: initial,
            regions: BTreeMap::new(),
        };
        for output in controller.dispatcher.outputs() {
            controller.refresh(ctx, output);
        }
        controller
    }

    /// Record a new control value and recompute exactly the regions that
    /// depend on it. Returns the regions that were refreshed.
    pub fn apply(&mut self, ctx: &DashboardContext, change: InputChange) -> Vec<OutputId> {
        let input = change.input_id();
        match change {
            InputChange::Site(site) => self.inputs.site = site,
            InputChange::Payload(range) => self.inputs.payload = range,
        }

        let outputs = self.dispatcher.dependents(input);
        log::debug!("{input:?} changed to {:?}, refreshing {outputs:?}", self.inputs);
        for &output in &outputs {
            self.refresh(ctx, output);
        }
        outputs
    }

    fn refresh(&mut self, ctx: &DashboardContext, output: OutputId) {
        let Some(content) = self.dispatcher.recompute(output, ctx, &self.inputs) else {
            return;
        };
        match &content {
            Ok(spec) => log::debug!("{output}: rendered '{}'", spec.title()),
            Err(e) => log::warn!("{output}: {e}"),
        }
        self.regions.insert(output, content);
    }

    pub fn inputs(&self) -> &Inputs {
        &self.inputs
    }

    pub fn region(&self, output: OutputId) -> Option<&RegionContent> {
        self.regions.get(&output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchRecord, Outcome};

    fn context() -> DashboardContext {
        let records = vec![
            LaunchRecord::new("A", 2000.0, Outcome::Success, "v1").unwrap(),
            LaunchRecord::new("B", 8000.0, Outcome::Failure, "v2").unwrap(),
        ];
        DashboardContext::new(LaunchDataset::from_records(records), SliderConfig::default())
    }

    fn scatter(controller: &Controller) -> &crate::chart::ScatterChartSpec {
        match controller.region(OutputId::PayloadScatterChart) {
            Some(Ok(ChartSpec::Scatter(s))) => s,
            other => panic!("expected scatter chart, got {other:?}"),
        }
    }

    fn pie(controller: &Controller) -> &crate::chart::PieChartSpec {
        match controller.region(OutputId::SuccessPieChart) {
            Some(Ok(ChartSpec::Pie(p))) => p,
            other => panic!("expected pie chart, got {other:?}"),
        }
    }

    #[test]
    fn dependency_graph_matches_dashboard_wiring() {
        let d = Dispatcher::default();
        assert_eq!(
            d.dependents(InputId::SiteDropdown),
            vec![OutputId::SuccessPieChart, OutputId::PayloadScatterChart]
        );
        assert_eq!(
            d.dependents(InputId::PayloadSlider),
            vec![OutputId::PayloadScatterChart]
        );
    }

    #[test]
    fn initial_state_renders_everything() {
        let ctx = context();
        let initial = ctx.default_inputs();
        assert_eq!(initial.site, "ALL");
        assert_eq!(initial.payload, [0.0, 10000.0]);

        let c = Controller::new(&ctx, initial);
        assert_eq!(pie(&c).title, "Total Success Launches for All Sites");
        assert_eq!(scatter(&c).point_count(), 2);
    }

    #[test]
    fn site_change_refreshes_both_regions() {
        let ctx = context();
        let mut c = Controller::new(&ctx, ctx.default_inputs());

        let refreshed = c.apply(&ctx, InputChange::Site("A".into()));
        assert_eq!(refreshed.len(), 2);
        assert_eq!(pie(&c).title, "Success Launches for A");
        assert_eq!(scatter(&c).point_count(), 1);
        assert_eq!(scatter(&c).series[0].points, vec![[2000.0, 1.0]]);
    }

    #[test]
    fn payload_change_leaves_pie_untouched() {
        let ctx = context();
        let mut c = Controller::new(&ctx, ctx.default_inputs());
        let pie_before = pie(&c).clone();

        let refreshed = c.apply(&ctx, InputChange::Payload([3000.0, 10000.0]));
        assert_eq!(refreshed, vec![OutputId::PayloadScatterChart]);
        assert_eq!(*pie(&c), pie_before);
        assert_eq!(scatter(&c).series.len(), 1);
        assert_eq!(scatter(&c).series[0].name, "v2");
    }

    #[test]
    fn unknown_site_is_shown_in_both_regions() {
        let ctx = context();
        let mut c = Controller::new(&ctx, ctx.default_inputs());
        c.apply(&ctx, InputChange::Site("Z".into()));

        for output in OutputId::ALL {
            assert!(matches!(
                c.region(output),
                Some(Err(SelectionError::InvalidSite { .. }))
            ));
        }
    }

    #[test]
    fn bad_range_only_blanks_the_scatter() {
        let ctx = context();
        let mut c = Controller::new(&ctx, ctx.default_inputs());
        c.apply(&ctx, InputChange::Payload([9000.0, 1000.0]));

        assert!(matches!(
            c.region(OutputId::PayloadScatterChart),
            Some(Err(SelectionError::InvalidRange { .. }))
        ));
        assert!(c.region(OutputId::SuccessPieChart).unwrap().is_ok());
    }

    #[test]
    fn latest_value_wins() {
        let ctx = context();
        let mut c = Controller::new(&ctx, ctx.default_inputs());
        c.apply(&ctx, InputChange::Site("B".into()));
        c.apply(&ctx, InputChange::Site("A".into()));
        assert_eq!(c.inputs().site, "A");
        assert_eq!(pie(&c).title, "Success Launches for A");
    }

    #[test]
    fn empty_filter_result_is_still_a_chart() {
        let ctx = context();
        let mut c = Controller::new(&ctx, ctx.default_inputs());
        c.apply(&ctx, InputChange::Payload([9000.0, 9500.0]));
        assert_eq!(scatter(&c).point_count(), 0);
    }

    #[test]
    fn rebinding_replaces_previous_binding() {
        let mut d = Dispatcher::default();
        d.bind(OutputId::SuccessPieChart, &[InputId::PayloadSlider], success_pie_chart);
        assert_eq!(d.outputs().len(), 2);
        assert_eq!(
            d.dependents(InputId::PayloadSlider),
            vec![OutputId::PayloadScatterChart, OutputId::SuccessPieChart]
        );
    }
}
