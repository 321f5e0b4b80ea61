/// Data layer: core types, loading, filtering and selection summaries.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → ListingTable (immutable, shared via Arc)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  FilterCriteria → ListingView (row indices, table order)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary  │  selected ids ∩ view → SummaryStats + per-row deltas
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;

#[cfg(test)]
pub(crate) mod fixtures;
