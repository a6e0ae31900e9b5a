use eframe::egui::{self, ScrollArea, Ui};

use crate::controller::OutputId;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: AppState,
}

impl DashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: heading ----
        egui::TopBottomPanel::top("heading").show(ctx, |ui| {
            panels::heading(ui);
        });

        // ---- Bottom panel: dataset summary ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            panels::status_bar(ui, &self.state);
        });

        // ---- Central panel: controls interleaved with their charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::site_dropdown(ui, &mut self.state);
                    self.state.sync_inputs();
                    ui.add_space(8.0);

                    plot::chart_region(ui, &self.state, OutputId::SuccessPieChart);
                    ui.add_space(8.0);

                    panels::payload_slider(ui, &mut self.state);
                    self.state.sync_inputs();
                    ui.add_space(8.0);

                    plot::chart_region(ui, &self.state, OutputId::PayloadScatterChart);
                });
        });
    }
}
