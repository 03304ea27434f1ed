use eframe::egui::Ui;
use egui_plot::{MarkerShape, Plot, Points};
use palette::Srgb;

use aire_monitor::color::to_color32;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Scatter map (central panel)
// ---------------------------------------------------------------------------

/// Render the visible readings as coloured points over longitude/latitude.
pub fn air_quality_map(ui: &mut Ui, state: &AppState) {
    let view = state.config.view;
    let size = ui.available_size();
    let extent = view.extent(size.x as f64, size.y as f64);
    let radius = (view.radius_pixels(state.config.point_radius_m) as f32).max(state.config.min_point_px);

    Plot::new("air_quality_map")
        .x_axis_label("longitude")
        .y_axis_label("latitude")
        // One degree of latitude is 1/cos(lat) times longer on screen.
        .data_aspect((1.0 / view.latitude.to_radians().cos()) as f32)
        .include_x(extent.min_lon)
        .include_x(extent.max_lon)
        .include_y(extent.min_lat)
        .include_y(extent.max_lat)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .label_formatter(|name, value| {
            if name.is_empty() {
                format!("lon {:.4}\nlat {:.4}", value.x, value.y)
            } else {
                name.to_owned()
            }
        })
        .show(ui, |plot_ui| {
            for layer in &state.deck.layers {
                for point in &layer.data {
                    let [r, g, b] = point.fill_color;
                    let marker = Points::new(vec![point.position])
                        .name(&point.tooltip)
                        .color(to_color32(Srgb::new(r, g, b)))
                        .shape(MarkerShape::Circle)
                        .filled(true)
                        .radius(radius);
                    plot_ui.points(marker);
                }
            }
        });
}
