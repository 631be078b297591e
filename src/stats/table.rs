use std::io::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::model::WineRecord;

use super::config::StatsConfig;
use super::engine::StatsRow;

// ---------------------------------------------------------------------------
// StatsTable – display-ready comparison table
// ---------------------------------------------------------------------------

/// One comparison table: a column per group, a line per statistic.
///
/// ```text
///  Measure            Class 1   Class 2   Class 3
///  Flavanoids Mean    2.98      2.08      0.78
///  Flavanoids Median  2.98      2.03      0.68
///  Flavanoids Mode    2.68      1.61      0.58
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsTable {
    pub title: String,
    pub precision: usize,
    /// Exact per-group results, in column order.
    pub rows: Vec<StatsRow>,
    /// One entry per statistic: caption and formatted cells.
    pub lines: Vec<MeasureLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasureLine {
    pub caption: String,
    pub cells: Vec<String>,
}

impl StatsTable {
    pub fn new(config: &StatsConfig, rows: Vec<StatsRow>) -> Self {
        let p = config.precision;
        let line = |statistic: &str, pick: fn(&StatsRow) -> Option<f64>| MeasureLine {
            caption: config.caption(statistic),
            cells: rows.iter().map(|r| format_cell(pick(r), p)).collect(),
        };

        let lines = vec![
            line("Mean", |r| Some(r.mean)),
            line("Median", |r| Some(r.median)),
            line("Mode", |r| r.mode),
        ];

        Self {
            title: config.title.to_string(),
            precision: p,
            rows,
            lines,
        }
    }

    /// Compute and format in one go.
    pub fn build(config: &StatsConfig, records: &[WineRecord]) -> Self {
        Self::new(config, config.compute(records))
    }

    /// Group labels, used as column headers.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|r| r.label.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Write the table as it is displayed: `Measure,<labels...>` header then
    /// one line per statistic.
    pub fn write_csv<W: Write>(&self, out: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(out);

        let mut header = vec!["Measure"];
        header.extend(self.labels());
        writer.write_record(&header).context("writing CSV header")?;

        for line in &self.lines {
            let mut record = vec![line.caption.as_str()];
            record.extend(line.cells.iter().map(String::as_str));
            writer
                .write_record(&record)
                .with_context(|| format!("writing '{}'", line.caption))?;
        }
        writer.flush().context("flushing CSV")?;
        Ok(())
    }

    /// Write the whole table as JSON: the exact per-group rows alongside the
    /// formatted lines.
    pub fn write_json<W: Write>(&self, out: W) -> Result<()> {
        serde_json::to_writer_pretty(out, self)
            .with_context(|| format!("writing '{}' as JSON", self.title))
    }
}

/// Fixed-point rendering; an absent value is shown as `-`.
pub fn format_cell(value: Option<f64>, precision: usize) -> String {
    match value {
        Some(v) => format!("{v:.precision$}"),
        None => "-".to_string(),
    }
}
