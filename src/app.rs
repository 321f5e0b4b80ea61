use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::Table;
use crate::state::AppState;
use crate::students::{display_columns, load_students, DisplayColumn};
use crate::ui::{panels, students};

// ---------------------------------------------------------------------------
// Listings browser
// ---------------------------------------------------------------------------

pub struct ListingsApp {
    pub state: AppState,
    title: String,
}

impl ListingsApp {
    pub fn new(state: AppState, title: impl Into<String>) -> Self {
        Self {
            state,
            title: title.into(),
        }
    }
}

impl eframe::App for ListingsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: results ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, &mut self.state, &self.title);
        });
    }
}

// ---------------------------------------------------------------------------
// Students table
// ---------------------------------------------------------------------------

pub struct StudentsApp {
    table: Table,
    columns: Vec<DisplayColumn>,
    status_message: Option<String>,
}

impl StudentsApp {
    pub fn new(table: Table) -> Self {
        let columns = display_columns(&table);
        Self {
            table,
            columns,
            status_message: None,
        }
    }

    fn open_file_dialog(&mut self) {
        let file = rfd::FileDialog::new()
            .set_title("Open students data")
            .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
            .pick_file();

        if let Some(path) = file {
            match load_students(&path) {
                Ok(table) => {
                    log::info!("Loaded {} students from {}", table.len(), path.display());
                    *self = StudentsApp::new(table);
                }
                Err(e) => {
                    let e = anyhow::Error::new(e);
                    log::error!("Failed to load {}: {e:#}", path.display());
                    self.status_message = Some(format!("Error: {e:#}"));
                }
            }
        }
    }

    fn top_bar(&mut self, ui: &mut Ui) {
        egui::menu::bar(ui, |ui: &mut Ui| {
            ui.menu_button("File", |ui: &mut Ui| {
                if ui.button("Open…").clicked() {
                    self.open_file_dialog();
                    ui.close_menu();
                }
            });
            ui.separator();
            ui.label(format!("{} students", self.table.len()));
            if let Some(msg) = &self.status_message {
                ui.separator();
                ui.label(RichText::new(msg).color(Color32::RED));
            }
        });
    }
}

impl eframe::App for StudentsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.top_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            students::students_table(ui, &self.table, &self.columns);
        });
    }
}
