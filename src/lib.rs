//! Grouped descriptive statistics for the wine dataset.
//!
//! [`data`] loads records from JSON, CSV or Parquet; [`stats`] groups them by
//! class and reports mean, median and mode per group. The desktop viewer in
//! `main.rs` only displays what these modules produce.

pub mod data;
pub mod stats;
