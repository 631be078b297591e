mod app;
mod color;
mod state;
mod ui;

use std::path::PathBuf;

use app::WineStatsApp;
use argh::FromArgs;
use eframe::egui;

#[derive(FromArgs, Debug)]
/// Grouped statistics viewer for the wine dataset
struct Args {
    /// dataset to open on startup (.json, .csv or .parquet)
    #[argh(option, short = 'f')]
    file: Option<PathBuf>,
}

fn main() -> eframe::Result {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut app = WineStatsApp::default();
    if let Some(path) = &args.file {
        app.state.load_path(path);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 760.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Wine Stats – Dataset Statistics",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
