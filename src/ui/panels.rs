use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::{matching_sites, site_label, AppState};

const HEADING_COLOR: Color32 = Color32::from_rgb(0x50, 0x3D, 0x36);

// ---------------------------------------------------------------------------
// Page heading
// ---------------------------------------------------------------------------

pub fn heading(ui: &mut Ui) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(
            RichText::new("SpaceX Launch Records Dashboard")
                .size(40.0)
                .color(HEADING_COLOR),
        );
    });
}

// ---------------------------------------------------------------------------
// Site dropdown
// ---------------------------------------------------------------------------

const SITE_PLACEHOLDER: &str = "Select a Launch Site here";

/// "All Sites" followed by every site in the order it appears in the data,
/// narrowed by the search box at the top of the list.
pub fn site_dropdown(ui: &mut Ui, state: &mut AppState) {
    let selected = if state.site_choice.is_empty() {
        RichText::new(SITE_PLACEHOLDER).weak()
    } else {
        RichText::new(site_label(&state.site_choice))
    };

    egui::ComboBox::from_id_salt("site-dropdown")
        .selected_text(selected)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut state.site_query)
                    .hint_text(SITE_PLACEHOLDER)
                    .desired_width(f32::INFINITY),
            );
            ui.separator();
            let options = matching_sites(&state.context.dataset.sites, &state.site_query);
            if options.is_empty() {
                ui.label(RichText::new("No matching sites").weak());
            }
            for value in options {
                ui.selectable_value(&mut state.site_choice, value.to_string(), site_label(value));
            }
        });
}

// ---------------------------------------------------------------------------
// Payload range selector
// ---------------------------------------------------------------------------

/// Two stepped handles over the configured bounds, with a mark at every step.
pub fn payload_slider(ui: &mut Ui, state: &mut AppState) {
    let slider = state.context.slider;

    ui.label("Payload range (Kg):");
    ui.horizontal(|ui: &mut Ui| {
        ui.spacing_mut().slider_width = (ui.available_width() / 2.0 - 80.0).max(100.0);
        ui.add(
            egui::Slider::new(&mut state.payload_low, slider.min..=slider.max)
                .step_by(slider.step)
                .text("from"),
        );
        ui.add(
            egui::Slider::new(&mut state.payload_high, slider.min..=slider.max)
                .step_by(slider.step)
                .text("to"),
        );
    });

    let marks: Vec<String> = slider.marks().iter().map(|m| format!("{m}")).collect();
    ui.label(RichText::new(marks.join("  ·  ")).small().weak());
}

// ---------------------------------------------------------------------------
// Status line
// ---------------------------------------------------------------------------

pub fn status_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        let ds = &state.context.dataset;
        if ds.is_empty() {
            ui.label(RichText::new("No launches loaded").color(Color32::RED));
            return;
        }
        ui.label(format!("{} launches from {} sites", ds.len(), ds.sites.len()));
        if let Some(n) = state.visible_launches() {
            ui.separator();
            ui.label(format!("{n} in payload scatter"));
        }
    });
}
