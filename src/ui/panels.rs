use eframe::egui::{self, Color32, RichText, Ui};

use aire_monitor::color::legend_entries;
use aire_monitor::data::model::Pollutant;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – threshold sliders
// ---------------------------------------------------------------------------

fn slider_step(pollutant: Pollutant) -> f64 {
    match pollutant {
        Pollutant::Pm25 | Pollutant::Pm10 => 1.0,
        Pollutant::Co => 0.01,
    }
}

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter controls");
    ui.separator();

    for pollutant in Pollutant::ALL {
        let mut value = state.bounds.max(pollutant);
        ui.strong(format!("Max {pollutant} ({})", pollutant.unit()));
        let slider = egui::Slider::new(&mut value, pollutant.range()).step_by(slider_step(pollutant));
        if ui.add(slider).changed() {
            state.set_max(pollutant, value);
        }
        ui.add_space(6.0);
    }

    if ui.button("Reset").clicked() {
        state.reset_bounds();
    }

    ui.separator();
    ui.strong("Point colour");
    for (label, color) in legend_entries() {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new("⏺").color(color));
            ui.label(label);
        });
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export filtered data…").clicked() {
                export_data_dialog(state);
                ui.close_menu();
            }
            if ui.button("Export map layer…").clicked() {
                export_map_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} readings, {} visible",
            state.dataset.len(),
            state.visible_indices.len()
        ));

        if let Some(summary) = state.summary {
            ui.separator();
            for column in summary {
                ui.label(format!("{} mean {:.1}", column.pollutant, column.mean))
                    .on_hover_text(format!(
                        "min {:.2}, max {:.2} {}",
                        column.min,
                        column.max,
                        column.pollutant.unit()
                    ));
            }
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn export_data_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export filtered readings")
        .set_file_name("readings.csv")
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .save_file();

    if let Some(path) = file {
        state.export_visible(&path);
    }
}

pub fn export_map_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Export map layer")
        .set_file_name("map_layer.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        state.export_map(&path);
    }
}
