/// Data layer: record types and loading.
///
/// Architecture:
/// ```text
///  .json / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → WineDataset
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ WineDataset │  Vec<WineRecord>, column index
///   └─────────────┘
///        │
///        ▼
///   stats::engine  (group → mean / median / mode)
/// ```

pub mod loader;
pub mod model;
