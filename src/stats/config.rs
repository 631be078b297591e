use crate::data::model::WineRecord;

use super::engine::{self, StatsRow};

// ---------------------------------------------------------------------------
// StatsConfig – one table worth of grouping + measurement
// ---------------------------------------------------------------------------

/// Which records go together and what is measured on them.
///
/// Every table in the viewer is an instance of this type driving the same
/// engine; no table has its own statistics code.
#[derive(Debug, Clone, Copy)]
pub struct StatsConfig {
    /// Heading shown above the table.
    pub title: &'static str,
    /// Row caption prefix, e.g. `Flavanoids` → `Flavanoids Mean`.
    pub measure: &'static str,
    /// Caption style for the three measure rows.
    pub caption: CaptionStyle,
    /// Decimal places used when displaying the numbers.
    pub precision: usize,
    /// Column whose value becomes the group label `Class {value}`.
    pub group_column: &'static str,
    /// Measurement for one record; `None` when it cannot be computed.
    pub extract: fn(&WineRecord) -> Option<f64>,
}

/// How the measure name and the statistic are combined into a row caption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionStyle {
    /// `Flavanoids Mean`
    Suffix,
    /// `Gamma (Mean)`
    Parenthesized,
}

impl StatsConfig {
    /// Group label of a record, `None` if the grouping column is missing or null.
    pub fn group_key(&self, record: &WineRecord) -> Option<String> {
        let value = record.get(self.group_column)?;
        if value.is_null() {
            return None;
        }
        Some(format!("Class {value}"))
    }

    /// Run the engine over `records` with this configuration.
    pub fn compute(&self, records: &[WineRecord]) -> Vec<StatsRow> {
        let rows = engine::compute(records, |r| self.group_key(r), self.extract);
        log::debug!("{}: {} groups from {} records", self.title, rows.len(), records.len());
        rows
    }

    pub fn caption(&self, statistic: &str) -> String {
        match self.caption {
            CaptionStyle::Suffix => format!("{} {statistic}", self.measure),
            CaptionStyle::Parenthesized => format!("{} ({statistic})", self.measure),
        }
    }
}

// ---------------------------------------------------------------------------
// Measurements
// ---------------------------------------------------------------------------

/// Raw `Flavanoids`, accepting numeric strings.
pub fn flavanoids(record: &WineRecord) -> Option<f64> {
    record.number("Flavanoids")
}

/// `(Ash * Hue) / Magnesium`.
///
/// `Magnesium == 0` yields an infinite (or NaN) ratio, which the engine
/// drops like any other invalid measurement.
pub fn gamma(record: &WineRecord) -> Option<f64> {
    let ash = record.number("Ash")?;
    let hue = record.number("Hue")?;
    let magnesium = record.number("Magnesium")?;
    Some((ash * hue) / magnesium)
}

// ---------------------------------------------------------------------------
// The two tables
// ---------------------------------------------------------------------------

pub fn flavanoids_by_alcohol() -> StatsConfig {
    StatsConfig {
        title: "Wine Dataset Statistics",
        measure: "Flavanoids",
        caption: CaptionStyle::Suffix,
        precision: 2,
        group_column: "Alcohol",
        extract: flavanoids,
    }
}

pub fn gamma_by_class() -> StatsConfig {
    StatsConfig {
        title: "Gamma Dataset Statistics",
        measure: "Gamma",
        caption: CaptionStyle::Parenthesized,
        precision: 3,
        group_column: "Class",
        extract: gamma,
    }
}

/// Tables shown by the viewer, in display order.
pub fn default_configs() -> Vec<StatsConfig> {
    vec![flavanoids_by_alcohol(), gamma_by_class()]
}
