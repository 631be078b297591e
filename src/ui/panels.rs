use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – dataset summary
// ---------------------------------------------------------------------------

/// Render the left summary panel.
pub fn side_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("Dataset");
    ui.separator();

    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.label("No dataset loaded.");
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if let Some(path) = &state.source {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                ui.label(RichText::new(name).strong());
            }
            ui.label(format!("{} records", dataset.len()));
            ui.separator();

            // ---- Class legend ----
            if let Some(cm) = &state.class_colors {
                ui.strong(format!("Classes ({})", cm.len()));
                for (label, color) in cm.legend_entries() {
                    ui.label(RichText::new(format!("■ {label}")).color(color));
                }
                ui.separator();
            }

            // ---- Per-table group counts ----
            for table in &state.tables {
                ui.label(format!("{}: {} groups", table.title, table.rows.len()));
            }
            ui.separator();

            // ---- Columns with their number of distinct values ----
            egui::CollapsingHeader::new(RichText::new("Columns").strong())
                .default_open(false)
                .show(ui, |ui: &mut Ui| {
                    for col in &dataset.column_names {
                        let n_unique = dataset.unique_values.get(col).map_or(0, |v| v.len());
                        ui.label(format!("{col}  ({n_unique} distinct)"));
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = !state.tables.is_empty();
            if ui
                .add_enabled(can_export, egui::Button::new("Export tables…"))
                .clicked()
            {
                export_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            ui.label(format!("{} records loaded", ds.len()));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open wine dataset")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn export_dialog(state: &mut AppState) {
    let Some(dir) = rfd::FileDialog::new()
        .set_title("Export tables to folder")
        .pick_folder()
    else {
        return;
    };

    match state.export_tables(&dir) {
        Ok(paths) => {
            log::info!("Exported {} tables to {}", paths.len(), dir.display());
            state.status_message = None;
        }
        Err(e) => {
            log::error!("Failed to export tables: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
