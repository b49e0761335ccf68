/// Data layer: job results in, broadened profiles out.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → JobDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ JobDataset  │  Vec<VibrationalJob>, column index
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  metadata predicates → visible job indices
///   └──────────┘
///        │  (spectrum::broaden)
///        ▼
///   ┌──────────┐
///   │  export   │  NamedProfile → .csv / .json / .parquet
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
