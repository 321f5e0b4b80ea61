use eframe::egui::Ui;
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Listing map (central panel, "Map" tab)
// ---------------------------------------------------------------------------

/// Scatter the visible listings by longitude / latitude, one series per
/// room type so the legend doubles as the colour key.
pub fn listing_map(ui: &mut Ui, state: &AppState) {
    let table = &state.table;

    // Degrees of longitude shrink with latitude; scale the x axis to match.
    let (lat_sum, n) = state
        .view
        .rows(table)
        .fold((0.0, 0usize), |(sum, n), l| (sum + l.latitude, n + 1));
    let mean_lat = if n == 0 { 0.0 } else { lat_sum / n as f64 };
    let aspect = mean_lat.to_radians().cos().max(0.1) as f32;

    Plot::new("listing_map")
        .legend(Legend::default())
        .data_aspect(aspect)
        .x_axis_label("Longitude")
        .y_axis_label("Latitude")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (room_type, color) in state.colors.legend_entries() {
                let points: PlotPoints = state
                    .view
                    .rows(table)
                    .filter(|l| l.room_type == room_type)
                    .map(|l| [l.longitude, l.latitude])
                    .collect();

                plot_ui.points(Points::new(points).name(&room_type).color(color).radius(2.5));
            }
        });
}
