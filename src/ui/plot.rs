use std::sync::Arc;

use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::chart::{Chart, Histogram, Scatter};
use crate::color::ChartColors;

const PLOT_HEIGHT: f32 = 420.0;
/// Cursor must be this close (fraction of each axis range) to show a tooltip.
const HOVER_TOLERANCE: f64 = 0.015;

// ---------------------------------------------------------------------------
// Chart area (central panel)
// ---------------------------------------------------------------------------

/// Render the chart built by the last trigger.
pub fn chart_view(ui: &mut Ui, chart: &Chart, colors: &ChartColors) {
    match chart {
        Chart::Histogram(h) => histogram_plot(ui, h, colors.bars),
        Chart::Scatter(s) => scatter_plot(ui, s, colors.points),
    }
}

fn histogram_plot(ui: &mut Ui, hist: &Histogram, color: Color32) {
    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .map(|b| {
            Bar::new(b.center(), b.count as f64)
                .width(b.width())
                .fill(color)
                .name(format!("{:.0} – {:.0}", b.lower, b.upper))
        })
        .collect();

    let chart = BarChart::new(bars)
        .color(color)
        .name(format!("{} ({} listings)", hist.column, hist.total()));

    Plot::new("histogram_plot")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(hist.column.clone())
        .y_axis_label("Count")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });

    if hist.skipped > 0 {
        ui.weak(format!("{} rows without a numeric {} were skipped", hist.skipped, hist.column));
    }
}

fn scatter_plot(ui: &mut Ui, scatter: &Arc<Scatter>, color: Color32) {
    let points: PlotPoints = scatter.points.iter().map(|p| [p.x, p.y]).collect();
    let series = Points::new(points)
        .radius(2.5)
        .color(color)
        .name(format!("{} vs {}", scatter.y_column, scatter.x_column));

    let hover = Arc::clone(scatter);

    Plot::new("scatter_plot")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(scatter.x_column.clone())
        .y_axis_label(scatter.y_column.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .label_formatter(move |_name, value| {
            match hover.nearest(value.x, value.y, HOVER_TOLERANCE) {
                Some(p) => {
                    let mut text = format!(
                        "{}: {:.0}\n{}: {:.0}",
                        hover.x_column, p.x, hover.y_column, p.y
                    );
                    for (col, val) in &p.hover {
                        text.push_str(&format!("\n{col}: {val}"));
                    }
                    text
                }
                None => String::new(),
            }
        })
        .show(ui, |plot_ui| {
            plot_ui.points(series);
        });

    if scatter.skipped > 0 {
        ui.weak(format!(
            "{} rows without numeric {} and {} were skipped",
            scatter.skipped, scatter.x_column, scatter.y_column
        ));
    }
}
