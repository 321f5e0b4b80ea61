use eframe::egui::{self, Align, Layout, ProgressBar, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::{CellValue, Table};
use crate::students::{progress_fraction, ColumnKind, DisplayColumn};

/// Read-only table: every cell rendered according to its column's kind.
pub fn students_table(ui: &mut Ui, table: &Table, columns: &[DisplayColumn]) {
    let row_height = ui.spacing().interact_size.y;

    let mut builder = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center));
    for _ in columns {
        builder = builder.column(Column::auto().at_least(80.0).clip(true));
    }

    builder
        .header(22.0, |mut header| {
            for column in columns {
                header.col(|ui: &mut Ui| {
                    let response = ui.strong(&column.label);
                    if let Some(help) = column.help {
                        response.on_hover_text(help);
                    }
                });
            }
        })
        .body(|body| {
            body.rows(row_height, table.len(), |mut row| {
                let cells = &table.rows[row.index()];
                for column in columns {
                    row.col(|ui: &mut Ui| cell(ui, column.kind, &cells[column.index]));
                }
            });
        });
}

fn cell(ui: &mut Ui, kind: ColumnKind, value: &CellValue) {
    match kind {
        ColumnKind::Text => {
            ui.label(value.to_string());
        }
        ColumnKind::Checkbox => {
            let mut checked = value.as_bool().unwrap_or(false);
            ui.add_enabled(false, egui::Checkbox::new(&mut checked, ""));
        }
        ColumnKind::Progress { min, max } => match progress_fraction(value, min, max) {
            Some(fraction) => {
                ui.add(
                    ProgressBar::new(fraction)
                        .desired_width(120.0)
                        .text(value.to_string()),
                );
            }
            None => {
                ui.label(value.to_string());
            }
        },
    }
}
