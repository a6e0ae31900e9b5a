/// Data layer: launch records, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate rows → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset  │  Vec<LaunchRecord>, site / booster index
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  site + payload predicates → borrowed subset
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
