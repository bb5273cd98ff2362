use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::CategoryColors;
use crate::data::aggregate::{Bin, NumericColumn};

const PLOT_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Category bar charts
// ---------------------------------------------------------------------------

/// One bar per category, coloured and named after it so the legend doubles
/// as the axis labels.
pub fn category_bars<'a>(
    ui: &mut Ui,
    id: &str,
    y_label: &str,
    values: impl Iterator<Item = (&'a String, f64)>,
    colors: &CategoryColors,
) {
    let charts: Vec<BarChart> = values
        .enumerate()
        .map(|(i, (category, value))| {
            let color = colors.color_for(category);
            let bar = Bar::new(i as f64, value)
                .width(0.7)
                .name(category)
                .fill(color);
            BarChart::new(vec![bar]).name(category).color(color)
        })
        .collect();

    if charts.is_empty() {
        ui.label("No customers match the current filters.");
        return;
    }

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .y_axis_label(y_label)
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Render precomputed bins as touching bars.
pub fn histogram(ui: &mut Ui, id: &str, column: NumericColumn, bins: &[Bin], fill: Color32) {
    if bins.is_empty() {
        ui.label("No customers match the current filters.");
        return;
    }

    let bars: Vec<Bar> = bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .fill(fill)
                .stroke((1.0, Color32::WHITE))
        })
        .collect();

    Plot::new(id)
        .height(PLOT_HEIGHT)
        .x_axis_label(column.to_string())
        .y_axis_label("Count")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name(column.to_string()));
        });
}
