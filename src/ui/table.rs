use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::ListingTable;

// ---------------------------------------------------------------------------
// Listings table (preview and full view)
// ---------------------------------------------------------------------------

const ROW_HEIGHT: f32 = 18.0;

/// Render the first `rows` rows of `table`.  Rows are virtualized, so the
/// full table is cheap to show as well.
pub fn data_table(ui: &mut Ui, id: &str, table: &ListingTable, rows: usize, max_height: f32) {
    let rows = table.head(rows);
    let columns = table.columns();

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .cell_layout(Layout::left_to_right(Align::Center))
            .max_scroll_height(max_height)
            .column(Column::auto().at_least(32.0))
            .columns(Column::auto().at_least(60.0).clip(true), columns.len())
            .header(20.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("#");
                });
                for name in columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                    let idx = row.index();
                    row.col(|ui: &mut Ui| {
                        ui.weak(idx.to_string());
                    });
                    for cell in &rows[idx] {
                        row.col(|ui: &mut Ui| {
                            if cell.is_null() {
                                ui.weak("–");
                            } else {
                                ui.label(cell.to_string());
                            }
                        });
                    }
                });
            });
    });
}

/// Collapsible view of every row.
pub fn full_table(ui: &mut Ui, table: &ListingTable) {
    egui::CollapsingHeader::new(format!("Full table ({} rows)", table.len()))
        .id_salt("full_table")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            data_table(ui, "full_table_body", table, table.len(), 400.0);
        });
}
