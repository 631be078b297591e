use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};
use wine_stats::stats::StatsTable;

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Per-class mean chart
// ---------------------------------------------------------------------------

/// Bar chart of the exact per-class means of `table`, one bar per class.
pub fn mean_chart(ui: &mut Ui, idx: usize, table: &StatsTable, colors: Option<&ColorMap>) {
    Plot::new(("mean_chart", idx))
        .height(180.0)
        .legend(Legend::default())
        .y_axis_label("Mean")
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (i, row) in table.rows.iter().enumerate() {
                let color = colors
                    .map(|cm| cm.color_for(&row.label))
                    .unwrap_or(Color32::LIGHT_BLUE);

                let bar = Bar::new(i as f64, row.mean)
                    .name(&row.label)
                    .fill(color)
                    .width(0.6);

                plot_ui.bar_chart(BarChart::new(vec![bar]).name(&row.label).color(color));
            }
        });
}
