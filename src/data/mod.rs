/// Data layer: core types, loading, validation, filtering and statistics.
///
/// Architecture:
/// ```text
///  .csv / .tsv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ preprocess  │  required columns, derived columns → StudentDataset
///   └────────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌─────────┐
///   │  filter   │   │  range   │  full dataset → padded axis limits
///   └──────────┘   └─────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary   │  filtered rows → per-grade counts, chart title
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod preprocess;
pub mod range;
pub mod summary;
