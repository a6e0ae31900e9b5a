//! Chart builders: pure functions from a record subset to a
//! renderer-agnostic chart description.
//!
//! Nothing in here touches egui; `ui::plot` draws these specs and
//! `export` writes them out as JSON.

pub mod pie;
pub mod scatter;

use serde::Serialize;

use crate::color::Rgb;

pub use pie::outcome_proportion_chart;
pub use scatter::outcome_vs_payload_chart;

// ---------------------------------------------------------------------------
// Pie chart spec
// ---------------------------------------------------------------------------

/// What each slice shows as its annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextInfo {
    PercentAndLabel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the chart total, in `0.0..=100.0`.
    pub percent: f64,
    pub color: Rgb,
}

impl PieSlice {
    /// Annotation text: `"42.9%\nCCAFS LC-40"`.
    pub fn annotation(&self) -> String {
        format!("{:.1}%\n{}", self.percent, self.label)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChartSpec {
    pub title: String,
    pub slices: Vec<PieSlice>,
    pub text_info: TextInfo,
    pub transition_ms: u32,
}

impl PieChartSpec {
    pub fn total(&self) -> usize {
        self.slices.iter().map(|s| s.count).sum()
    }
}

// ---------------------------------------------------------------------------
// Scatter chart spec
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisTick {
    pub value: f64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Axis {
    pub title: String,
    /// Explicit tick labels; empty means the renderer picks its own.
    pub ticks: Vec<AxisTick>,
}

impl Axis {
    /// Label assigned to the tick at `value`, if any.
    pub fn tick_label(&self, value: f64) -> Option<&str> {
        self.ticks
            .iter()
            .find(|t| (t.value - value).abs() < 1e-9)
            .map(|t| t.label.as_str())
    }
}

/// Points sharing one colour channel value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub name: String,
    pub color: Rgb,
    /// `[x, y]` pairs.
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChartSpec {
    pub title: String,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend_title: String,
    pub series: Vec<ScatterSeries>,
}

impl ScatterChartSpec {
    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Either kind, as held by a display region
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartSpec {
    Pie(PieChartSpec),
    Scatter(ScatterChartSpec),
}

impl ChartSpec {
    pub fn title(&self) -> &str {
        match self {
            ChartSpec::Pie(p) => &p.title,
            ChartSpec::Scatter(s) => &s.title,
        }
    }
}
