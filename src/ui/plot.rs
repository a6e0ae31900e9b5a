use std::f64::consts::TAU;

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{ChartSpec, PieChartSpec, ScatterChartSpec};
use crate::controller::OutputId;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 320.0;
/// Segments per full turn when approximating slice arcs.
const ARC_SEGMENTS: f64 = 128.0;

// ---------------------------------------------------------------------------
// Display region
// ---------------------------------------------------------------------------

/// Draw whatever the controller currently holds for `output`: the chart, or
/// the selection error in its place.
pub fn chart_region(ui: &mut Ui, state: &AppState, output: OutputId) {
    match state.region(output) {
        Some(Ok(ChartSpec::Pie(spec))) => pie_chart(ui, output, spec),
        Some(Ok(ChartSpec::Scatter(spec))) => scatter_chart(ui, output, spec),
        Some(Err(e)) => {
            ui.group(|ui: &mut Ui| {
                ui.set_min_height(CHART_HEIGHT / 2.0);
                ui.centered_and_justified(|ui: &mut Ui| {
                    ui.label(RichText::new(format!("Error: {e}")).color(Color32::RED));
                });
            });
        }
        None => {}
    }
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// Polygon outline of a slice from `start` to `end` (radians, clockwise from
/// twelve o'clock) on the unit circle.
fn slice_outline(start: f64, end: f64) -> Vec<[f64; 2]> {
    let segments = (((end - start) / TAU) * ARC_SEGMENTS).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(segments + 2);
    points.push([0.0, 0.0]);
    for i in 0..=segments {
        let angle = start + (end - start) * i as f64 / segments as f64;
        points.push([angle.sin(), angle.cos()]);
    }
    points
}

fn pie_chart(ui: &mut Ui, output: OutputId, spec: &PieChartSpec) {
    ui.strong(&spec.title);

    let total = spec.total();
    if total == 0 {
        ui.label(RichText::new("No launches to show").weak());
    }

    Plot::new(output.id())
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            if total == 0 {
                return;
            }
            let mut start = 0.0;
            for slice in &spec.slices {
                let sweep = TAU * slice.count as f64 / total as f64;
                if sweep <= 0.0 {
                    continue;
                }
                let end = start + sweep;
                let color = slice.color.to_color32();

                plot_ui.polygon(
                    Polygon::new(PlotPoints::from(slice_outline(start, end)))
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE))
                        .name(&slice.label),
                );

                let mid = start + sweep / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.65 * mid.sin(), 0.65 * mid.cos()),
                        RichText::new(slice.annotation()).color(Color32::WHITE).strong(),
                    )
                    .anchor(Align2::CENTER_CENTER),
                );
                start = end;
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

fn scatter_chart(ui: &mut Ui, output: OutputId, spec: &ScatterChartSpec) {
    ui.strong(&spec.title);
    if !spec.series.is_empty() {
        ui.label(RichText::new(&spec.legend_title).small());
    }

    let y_axis = spec.y_axis.clone();
    Plot::new(output.id())
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(spec.x_axis.title.clone())
        .y_axis_label(spec.y_axis.title.clone())
        .include_x(0.0)
        .include_y(-0.25)
        .include_y(1.25)
        .y_axis_formatter(move |mark, _range| {
            y_axis.tick_label(mark.value).unwrap_or_default().to_string()
        })
        .show(ui, |plot_ui| {
            for series in &spec.series {
                plot_ui.points(
                    Points::new(PlotPoints::from(series.points.clone()))
                        .name(&series.name)
                        .color(series.color.to_color32())
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(4.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_outline_starts_at_center_and_stays_on_unit_circle() {
        let pts = slice_outline(0.0, TAU / 4.0);
        assert_eq!(pts[0], [0.0, 0.0]);
        // Twelve o'clock, then clockwise towards three o'clock.
        assert!((pts[1][0] - 0.0).abs() < 1e-12 && (pts[1][1] - 1.0).abs() < 1e-12);
        let last = pts.last().unwrap();
        assert!((last[0] - 1.0).abs() < 1e-12 && last[1].abs() < 1e-12);
        for p in &pts[1..] {
            assert!(((p[0] * p[0] + p[1] * p[1]).sqrt() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn tiny_slice_still_has_an_arc() {
        let pts = slice_outline(1.0, 1.0001);
        assert!(pts.len() >= 3);
    }
}
