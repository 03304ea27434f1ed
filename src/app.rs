use eframe::egui;

use crate::state::AppState;
use crate::ui::{map, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AireMonitorApp {
    pub state: AppState,
}

impl AireMonitorApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for AireMonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: threshold sliders ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Bottom panel: filtered table ----
        egui::TopBottomPanel::bottom("data_table")
            .default_height(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("Filtered readings");
                table::readings_table(ui, &self.state);
            });

        // ---- Central panel: map ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Air quality map");
            map::air_quality_map(ui, &self.state);
        });
    }
}
