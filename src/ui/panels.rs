use std::sync::Arc;

use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use crate::data::loader::load_listings;
use crate::state::{AppState, ResultTab};
use crate::ui::{list, map};

pub const WARNING: Color32 = Color32::from_rgb(0xff, 0xbd, 0x45);

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    // Own a handle so option lists can be borrowed while `state` is mutated.
    let table = Arc::clone(&state.table);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Room type ----
            let header = format!(
                "Room type  ({}/{})",
                state.criteria.room_types.len(),
                table.room_types().len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("room_type")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for room_type in table.room_types() {
                        let mut checked = state.criteria.room_types.contains(room_type);
                        let text = RichText::new(room_type).color(state.colors.color_for(room_type));
                        if ui.checkbox(&mut checked, text).changed() {
                            state.toggle_room_type(room_type);
                        }
                    }
                });

            // ---- Neighbourhood group ----
            let header = format!(
                "Neighbourhood group  ({}/{})",
                state.criteria.neighbourhood_groups().len(),
                table.neighbourhood_groups().len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("neighbourhood_group")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    for group in table.neighbourhood_groups() {
                        let mut checked = state.criteria.neighbourhood_groups().contains(group);
                        if ui.checkbox(&mut checked, group).changed() {
                            state.toggle_neighbourhood_group(group);
                        }
                    }
                });

            // ---- Neighbourhood (depends on the groups above) ----
            let options = state.neighbourhood_options();
            let header = format!(
                "Neighbourhood  ({}/{})",
                state.criteria.neighbourhoods().len(),
                options.len()
            );
            egui::CollapsingHeader::new(RichText::new(header).strong())
                .id_salt("neighbourhood")
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    if options.is_empty() {
                        ui.weak("Select a neighbourhood group first");
                        return;
                    }
                    ui.horizontal(|ui: &mut Ui| {
                        if ui.small_button("All").clicked() {
                            state.select_all_neighbourhoods();
                        }
                        if ui.small_button("None").clicked() {
                            state.clear_neighbourhoods();
                        }
                    });
                    for neighbourhood in &options {
                        let mut checked = state.criteria.neighbourhoods().contains(neighbourhood);
                        if ui.checkbox(&mut checked, neighbourhood).changed() {
                            state.toggle_neighbourhood(neighbourhood);
                        }
                    }
                });

            // ---- Price range ----
            ui.separator();
            ui.strong("Price range");
            let (lo, hi) = table.price_bounds();
            let (mut min, mut max) = state.criteria.price_range();
            ui.add(
                Slider::new(&mut min, lo..=hi)
                    .logarithmic(lo > 0.0)
                    .prefix("$ ")
                    .text("min"),
            );
            ui.add(
                Slider::new(&mut max, lo..=hi)
                    .logarithmic(lo > 0.0)
                    .prefix("$ ")
                    .text("max"),
            );
            state.set_price_range(min, max);
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} listings loaded, {} visible, {} selected",
            state.table.len(),
            state.view.len(),
            state.selected.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – results
// ---------------------------------------------------------------------------

pub fn central_panel(ui: &mut Ui, state: &mut AppState, title: &str) {
    ui.heading(title);
    if let Some(description) = &state.description {
        egui::CollapsingHeader::new("About this dataset")
            .default_open(false)
            .show(ui, |ui: &mut Ui| {
                ui.label(description.as_str());
            });
    }
    ui.separator();

    if state.no_results() {
        ui.label(RichText::new("Sorry, no airbnb found").color(WARNING).strong());
        return;
    }

    ui.label(RichText::new("Unique airbnb found").small().weak());
    ui.label(RichText::new(state.view.len().to_string()).size(28.0));

    ui.horizontal(|ui: &mut Ui| {
        ui.selectable_value(&mut state.tab, ResultTab::List, "List");
        ui.selectable_value(&mut state.tab, ResultTab::Map, "Map");
    });
    ui.separator();

    match state.tab {
        ResultTab::List => list::listing_table(ui, state),
        ResultTab::Map => map::listing_map(ui, state),
    }
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open listings")
        .add_filter("Supported files", &["csv", "json"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        match load_listings(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} listings from {}",
                    table.len(),
                    path.display()
                );
                state.set_table(Arc::new(table));
            }
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("Failed to load {}: {e:#}", path.display());
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
