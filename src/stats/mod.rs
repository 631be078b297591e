/// Statistics layer: the grouped engine, the table configurations, and the
/// display tables built from them.
///
/// ```text
///   &[WineRecord]
///        │  StatsConfig (group column + measurement)
///        ▼
///   ┌──────────┐
///   │  engine  │  group → mean / median / mode → Vec<StatsRow>
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  table   │  fixed-precision cells, CSV export
///   └──────────┘
/// ```

pub mod config;
pub mod engine;
pub mod table;

pub use config::{StatsConfig, default_configs, flavanoids_by_alcohol, gamma, gamma_by_class};
pub use engine::{StatsRow, compute};
pub use table::StatsTable;
