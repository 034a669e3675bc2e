use std::path::PathBuf;

use eframe::egui::{self, RichText, Ui};

use crate::chart::ChartKind;
use crate::data::columns::AxisChoice;
use crate::state::{Event, Notice, Session};

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, session: &Session, events: &mut Vec<Event>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                if let Some(path) = open_file_dialog() {
                    events.push(Event::OpenFile(path));
                }
                ui.close_menu();
            }
            if ui.button("Reload from disk").clicked() {
                events.push(Event::Reload);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(session.data_path().display().to_string());

        if let Some(table) = &session.table {
            ui.separator();
            ui.label(format!(
                "{} listings, {} columns",
                table.len(),
                table.columns().len()
            ));
        }

        let cache = session.cache();
        ui.separator();
        ui.weak(format!("{} cached, {} reads", cache.entry_count(), cache.reads()));
    });
}

// ---------------------------------------------------------------------------
// Page header and messages
// ---------------------------------------------------------------------------

pub fn header(ui: &mut Ui) {
    ui.heading("Dashboard: vehicle listings");
    ui.label("Interactive histogram and scatter plot of the listings data.");
    ui.add_space(6.0);
}

pub fn notices(ui: &mut Ui, notices: &[Notice]) {
    for notice in notices {
        match notice {
            Notice::Error(msg) => {
                let color = ui.visuals().error_fg_color;
                ui.label(RichText::new(format!("Error: {msg}")).color(color));
            }
            Notice::Warning(msg) => {
                let color = ui.visuals().warn_fg_color;
                ui.label(RichText::new(msg).color(color));
            }
            Notice::Info(msg) => {
                ui.label(msg);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Chart triggers and axis choice
// ---------------------------------------------------------------------------

/// Buttons that build a chart, plus column pickers for unresolved axes.
pub fn controls(ui: &mut Ui, session: &Session, events: &mut Vec<Event>) {
    let axes = session.axes.as_ref();
    let x_label = axes
        .and_then(|a| a.x.column())
        .unwrap_or("?")
        .to_string();
    let y_label = axes
        .and_then(|a| a.y.column())
        .unwrap_or("?")
        .to_string();

    ui.columns(2, |cols: &mut [Ui]| {
        if cols[0]
            .button(format!("Build histogram ({x_label})"))
            .clicked()
        {
            events.push(Event::BuildChart(ChartKind::Histogram));
        }
        if cols[1]
            .button(format!("Build scatter ({y_label} vs {x_label})"))
            .clicked()
        {
            events.push(Event::BuildChart(ChartKind::Scatter));
        }
    });

    if let Some(axes) = axes {
        axis_picker(ui, "x_axis_choice", "x axis", &axes.x, events, Event::ChooseX);
        axis_picker(ui, "y_axis_choice", "y axis", &axes.y, events, Event::ChooseY);
    }
}

/// Only shown when the expected column is missing.
fn axis_picker(
    ui: &mut Ui,
    id: &str,
    label: &str,
    choice: &AxisChoice,
    events: &mut Vec<Event>,
    to_event: fn(String) -> Event,
) {
    let AxisChoice::Unresolved { wanted, available } = choice else {
        return;
    };

    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("No '{wanted}' column. Pick the {label}:"));
        egui::ComboBox::from_id_salt(id)
            .selected_text("select a column")
            .show_ui(ui, |ui: &mut Ui| {
                for col in available {
                    if ui.selectable_label(false, col).clicked() {
                        events.push(to_event(col.clone()));
                    }
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Cleaned sample download
// ---------------------------------------------------------------------------

pub fn download(ui: &mut Ui, session: &Session, events: &mut Vec<Event>) {
    let Some(sample) = &session.sample else {
        return;
    };

    ui.separator();
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .button("Download cleaned sample")
            .on_hover_text(sample.path().display().to_string())
            .clicked()
        {
            if let Some(dest) = save_file_dialog(&sample.file_name()) {
                events.push(Event::ExportSample(dest));
            }
        }
        ui.weak(format!("{} ({} bytes)", sample.file_name(), sample.size()));
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open listings data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file()
}

fn save_file_dialog(file_name: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save cleaned sample")
        .set_file_name(file_name)
        .save_file()
}
