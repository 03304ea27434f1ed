/// Data layer: core types, generation, filtering and export.
///
/// Architecture:
/// ```text
///   seed + row count
///        │
///        ▼
///   ┌───────────┐
///   │ generator │  uniform draws → Dataset
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset  │  Vec<Reading>, immutable after generation
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  FilterBounds → visible indices / sub-dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export  │  .csv / .json / .parquet
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod generator;
pub mod model;
