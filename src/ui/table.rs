use eframe::egui::{Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use aire_monitor::data::model::COLUMN_NAMES;

use crate::state::AppState;

const ROW_HEIGHT: f32 = 18.0;

/// Render the filtered readings, one row each, in dataset order.
pub fn readings_table(ui: &mut Ui, state: &AppState) {
    if state.visible_indices.is_empty() {
        ui.label("No readings within the selected thresholds.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::right_to_left(Align::Center))
        .column(Column::auto().at_least(40.0))
        .columns(Column::remainder().at_least(70.0), COLUMN_NAMES.len())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("#");
            });
            for name in COLUMN_NAMES {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, state.visible_indices.len(), |mut row| {
                let idx = state.visible_indices[row.index()];
                let Some(reading) = state.dataset.get(idx) else {
                    return;
                };
                row.col(|ui| {
                    ui.label(idx.to_string());
                });
                let cells = [
                    reading.latitude,
                    reading.longitude,
                    reading.pm25,
                    reading.pm10,
                    reading.co,
                ];
                for value in cells {
                    row.col(|ui| {
                        ui.label(format!("{value:.4}"));
                    });
                }
            });
        });
}
