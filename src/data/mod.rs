/// Data layer: launch records, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site / booster index
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  site selector, payload range → record subset
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
