use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use wine_stats::data::loader;
use wine_stats::data::model::WineDataset;
use wine_stats::stats::{StatsConfig, StatsTable, default_configs};

use crate::color::ColorMap;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset (None until user loads a file).
    pub dataset: Option<WineDataset>,

    /// Where the dataset came from.
    pub source: Option<PathBuf>,

    /// Tables to compute for every dataset.
    pub configs: Vec<StatsConfig>,

    /// Tables for the current dataset, one per config.
    pub tables: Vec<StatsTable>,

    /// Colour per group label, shared by all tables.
    pub class_colors: Option<ColorMap>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            source: None,
            configs: default_configs(),
            tables: Vec::new(),
            class_colors: None,
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset and recompute every table from scratch.
    pub fn set_dataset(&mut self, dataset: WineDataset) {
        self.tables = self
            .configs
            .iter()
            .map(|cfg| StatsTable::build(cfg, &dataset.records))
            .collect();

        let labels: Vec<&str> = self.tables.iter().flat_map(|t| t.labels()).collect();
        self.class_colors = Some(ColorMap::new(labels));

        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Load a file and make it the current dataset; failures end up in
    /// `status_message`.
    pub fn load_path(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(dataset) => {
                self.source = Some(path.to_path_buf());
                self.set_dataset(dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    /// Write every table as `<measure>.csv` and `<measure>.json` into `dir`.
    pub fn export_tables(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.tables.len() * 2);
        for (cfg, table) in self.configs.iter().zip(&self.tables) {
            let stem = dir.join(cfg.measure.to_ascii_lowercase());

            let csv_path = stem.with_extension("csv");
            let file = std::fs::File::create(&csv_path)
                .with_context(|| format!("creating {}", csv_path.display()))?;
            table
                .write_csv(file)
                .with_context(|| format!("exporting {}", table.title))?;
            written.push(csv_path);

            let json_path = stem.with_extension("json");
            let file = std::fs::File::create(&json_path)
                .with_context(|| format!("creating {}", json_path.display()))?;
            table.write_json(file)?;
            written.push(json_path);
        }
        Ok(written)
    }
}
