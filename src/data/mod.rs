/// Data layer: loading, normalization, statistics and export.
///
/// Architecture:
/// ```text
///  file / upload / URL
///        │
///        ▼
///   ┌──────────┐   ┌─────────┐
///   │  loader   │──│ columns  │  header aliases → field positions
///   └──────────┘   └─────────┘
///        │  Vec<CountyIncomeRecord>   (memoized per source by `cache`)
///        ▼
///   ┌──────────┐
///   │  stats    │  state filter, medians → DerivedStateView → sorted rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  rows → CSV text
///   └──────────┘
/// ```

pub mod cache;
pub mod columns;
pub mod export;
pub mod format;
pub mod loader;
pub mod model;
pub mod stats;
