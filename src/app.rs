use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, tables};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct WineStatsApp {
    pub state: AppState,
}

impl eframe::App for WineStatsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: dataset summary ----
        egui::SidePanel::left("summary_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: statistics tables ----
        egui::CentralPanel::default().show(ctx, |ui| {
            tables::statistics_view(ui, &self.state);
        });
    }
}
