use eframe::egui::{self, ScrollArea, Ui};

use crate::color::{self, ChartColors};
use crate::config::DashboardConfig;
use crate::state::{Event, Session};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub session: Session,
    preview_rows: usize,
    colors: ChartColors,
}

impl DashboardApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &DashboardConfig) -> Self {
        cc.egui_ctx.set_visuals(color::visuals(config.theme));

        let mut session = Session::from_config(config);
        session.handle(Event::Render);

        Self {
            session,
            preview_rows: config.preview_rows,
            colors: ChartColors::new(config.theme, config.accent_hue),
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut events = Vec::new();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.session, &mut events);
        });

        // ---- Central panel: header, table, charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    panels::header(ui);
                    panels::notices(ui, &self.session.notices);

                    // A failed load leaves no table: nothing else to draw.
                    let Some(data) = self.session.table.clone() else {
                        return;
                    };

                    if data.is_empty() {
                        ui.label("The file has a header but no listings.");
                    }

                    ui.add_space(6.0);
                    ui.strong("Data preview");
                    table::data_table(ui, "preview_table", &data, self.preview_rows, 260.0);
                    ui.add_space(8.0);

                    panels::controls(ui, &self.session, &mut events);

                    if let Some(chart) = &self.session.chart {
                        ui.add_space(4.0);
                        plot::chart_view(ui, chart, &self.colors);
                    }

                    ui.add_space(8.0);
                    table::full_table(ui, &data);
                    panels::download(ui, &self.session, &mut events);
                });
        });

        for event in events {
            self.session.handle(event);
        }
    }
}
