use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;

use crate::controller::{DashboardContext, Inputs};
use crate::data::model::ALL_SITES;

/// Most tick marks the payload slider will draw.
const MAX_SLIDER_MARKS: f64 = 1000.0;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "launch-dashboard",
    version,
    about = "Interactive launch records dashboard"
)]
pub struct Cli {
    /// Launch records file (.csv, .json, .parquet)
    #[arg(long, default_value = "spacex_launch_dash.csv")]
    pub data: PathBuf,

    /// Initially selected launch site ("ALL" for every site)
    #[arg(long, default_value = ALL_SITES)]
    pub site: String,

    /// Initial lower end of the payload range (kg)
    #[arg(long)]
    pub payload_min: Option<f64>,

    /// Initial upper end of the payload range (kg)
    #[arg(long)]
    pub payload_max: Option<f64>,

    /// Upper bound of the payload slider (kg)
    #[arg(long, default_value_t = 10000.0)]
    pub slider_max: f64,

    /// Payload slider step (kg)
    #[arg(long, default_value_t = 1000.0)]
    pub slider_step: f64,

    /// Write both chart specs as JSON into this directory and exit (no window)
    #[arg(long, value_name = "DIR")]
    pub export: Option<PathBuf>,
}

/// Bounds and step of the payload range selector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10000.0,
            step: 1000.0,
        }
    }
}

impl SliderConfig {
    /// Tick marks shown under the slider: every `step` from `min` to `max`.
    pub fn marks(&self) -> Vec<f64> {
        let n = ((self.max - self.min) / self.step).floor() as usize;
        (0..=n).map(|i| self.min + i as f64 * self.step).collect()
    }
}

impl Cli {
    pub fn slider(&self) -> Result<SliderConfig> {
        if !self.slider_max.is_finite() || self.slider_max <= 0.0 {
            bail!("--slider-max must be a positive number, got {}", self.slider_max);
        }
        if !self.slider_step.is_finite() || self.slider_step <= 0.0 {
            bail!("--slider-step must be a positive number, got {}", self.slider_step);
        }
        if self.slider_step < 1.0 || self.slider_max / self.slider_step > MAX_SLIDER_MARKS {
            bail!(
                "--slider-step {} is too fine for --slider-max {}: steps must be at least \
                 1 kg and yield at most {MAX_SLIDER_MARKS} marks",
                self.slider_step,
                self.slider_max
            );
        }
        Ok(SliderConfig {
            min: 0.0,
            max: self.slider_max,
            step: self.slider_step,
        })
    }

    /// Control values the dashboard opens with. Not validated here: an
    /// unknown site or inverted range shows up as an error in the charts.
    pub fn initial_inputs(&self, ctx: &DashboardContext) -> Inputs {
        let defaults = ctx.default_inputs();
        Inputs {
            site: self.site.clone(),
            payload: [
                self.payload_min.unwrap_or(defaults.payload[0]),
                self.payload_max.unwrap_or(defaults.payload[1]),
            ],
        }
    }
}
