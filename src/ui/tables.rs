use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use wine_stats::stats::StatsTable;

use crate::color::ColorMap;
use crate::state::AppState;
use crate::ui::plot;

// ---------------------------------------------------------------------------
// Central panel – statistics tables
// ---------------------------------------------------------------------------

/// Render every configured table, each followed by its bar chart.
pub fn statistics_view(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to view statistics  (File → Open…)");
            });
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for (idx, table) in state.tables.iter().enumerate() {
                ui.heading(&table.title);
                ui.add_space(4.0);

                if dataset.is_empty() {
                    ui.label("Loading data...");
                } else if table.is_empty() {
                    ui.label("No valid measurements in this dataset.");
                } else {
                    ui.push_id(("stats_table", idx), |ui: &mut Ui| {
                        stats_table(ui, table, state.class_colors.as_ref());
                    });
                    ui.add_space(8.0);
                    plot::mean_chart(ui, idx, table, state.class_colors.as_ref());
                }
                ui.separator();
            }
        });
}

/// One comparison table: `Measure` column then a column per class.
fn stats_table(ui: &mut Ui, table: &StatsTable, colors: Option<&ColorMap>) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(150.0))
        .columns(Column::auto().at_least(80.0), table.rows.len())
        .header(22.0, |mut header| {
            header.col(|ui| {
                ui.strong("Measure");
            });
            for label in table.labels() {
                header.col(|ui| {
                    let mut text = RichText::new(label).strong();
                    if let Some(cm) = colors {
                        text = text.color(cm.color_for(label));
                    }
                    ui.label(text);
                });
            }
        })
        .body(|mut body| {
            for line in &table.lines {
                body.row(20.0, |mut row| {
                    row.col(|ui| {
                        ui.label(&line.caption);
                    });
                    for cell in &line.cells {
                        row.col(|ui| {
                            ui.monospace(cell);
                        });
                    }
                });
            }
        });
}
