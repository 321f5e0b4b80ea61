use std::sync::Arc;

use eframe::egui::{Align, Layout, ProgressBar, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::filter::FilterCriteria;
use crate::data::model::Listing;
use crate::state::AppState;
use crate::ui::details;

// ---------------------------------------------------------------------------
// Columns of the list view
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListColumn {
    Name,
    HostName,
    Location,
    Area,
    RoomType,
    Price,
    MinimumNights,
    Availability,
}

impl ListColumn {
    pub fn label(self) -> &'static str {
        match self {
            ListColumn::Name => "Name",
            ListColumn::HostName => "Host Name",
            ListColumn::Location => "Location",
            ListColumn::Area => "Area",
            ListColumn::RoomType => "Room type",
            ListColumn::Price => "Price (in USD)",
            ListColumn::MinimumNights => "Minimum nights",
            ListColumn::Availability => "Availability",
        }
    }

    pub fn help(self) -> Option<&'static str> {
        match self {
            ListColumn::MinimumNights => {
                Some("Minimum number of nights the place has to be booked")
            }
            ListColumn::Availability => Some("How many days per year the airbnb is available"),
            _ => None,
        }
    }
}

/// Columns worth showing for the current criteria.
///
/// A column whose filter pins it to a single value carries no information
/// and is hidden.
pub fn visible_columns(criteria: &FilterCriteria) -> Vec<ListColumn> {
    let single_group = criteria.neighbourhood_groups().len() == 1;
    let single_area = single_group && criteria.neighbourhoods().len() == 1;
    let single_room = criteria.room_types.len() == 1;

    let mut columns = vec![ListColumn::Name, ListColumn::HostName];
    if !single_group {
        columns.push(ListColumn::Location);
    }
    if !single_area {
        columns.push(ListColumn::Area);
    }
    if !single_room {
        columns.push(ListColumn::RoomType);
    }
    columns.extend([
        ListColumn::Price,
        ListColumn::MinimumNights,
        ListColumn::Availability,
    ]);
    columns
}

// ---------------------------------------------------------------------------
// List view
// ---------------------------------------------------------------------------

/// Render the filtered rows with a select checkbox per row, the
/// "See details" trigger and the resulting detail cards.
pub fn listing_table(ui: &mut Ui, state: &mut AppState) {
    let columns = visible_columns(&state.criteria);
    let table = Arc::clone(&state.table);
    let indices = state.view.indices().to_vec();
    let row_height = ui.spacing().interact_size.y;

    // Checkbox clicks are collected and applied after the table is drawn.
    let mut toggled: Vec<u64> = Vec::new();

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .vscroll(true)
        .max_scroll_height(360.0)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::auto());
    for _ in &columns {
        builder = builder.column(Column::auto().at_least(60.0).clip(true));
    }

    builder
        .header(22.0, |mut header| {
            header.col(|ui: &mut Ui| {
                ui.strong("Select")
                    .on_hover_text("Select airbnb and press the button to view details");
            });
            for column in &columns {
                header.col(|ui: &mut Ui| {
                    let response = ui.strong(column.label());
                    if let Some(help) = column.help() {
                        response.on_hover_text(help);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(row_height, indices.len(), |mut row| {
                let Some(listing) = table.get(indices[row.index()]) else {
                    return;
                };
                row.col(|ui: &mut Ui| {
                    let mut checked = state.selected.contains(&listing.id);
                    if ui.checkbox(&mut checked, "").changed() {
                        toggled.push(listing.id);
                    }
                });
                for column in &columns {
                    row.col(|ui: &mut Ui| cell(ui, *column, listing));
                }
            });
        });

    for id in toggled {
        state.toggle_selected(id);
    }

    ui.add_space(8.0);
    if ui.button("See details").clicked() {
        state.request_details();
    }
    details::details_section(ui, state);
}

fn cell(ui: &mut Ui, column: ListColumn, listing: &Listing) {
    match column {
        ListColumn::Name => {
            ui.label(&listing.name);
        }
        ListColumn::HostName => {
            ui.label(&listing.host_name);
        }
        ListColumn::Location => {
            ui.label(&listing.neighbourhood_group);
        }
        ListColumn::Area => {
            ui.label(&listing.neighbourhood);
        }
        ListColumn::RoomType => {
            ui.label(&listing.room_type);
        }
        ListColumn::Price => {
            ui.label(format!("$ {:.2}", listing.price));
        }
        ListColumn::MinimumNights => {
            ui.label(listing.minimum_nights.to_string());
        }
        ListColumn::Availability => {
            let fraction = f32::from(listing.availability_365) / 365.0;
            ui.add(
                ProgressBar::new(fraction)
                    .desired_width(100.0)
                    .text(listing.availability_365.to_string()),
            );
        }
    }
}
