/// Data layer: table types, loading, and filtering.
///
/// Architecture:
/// ```text
///  GrowLocations.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LocationTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LocationTable │  columns + Vec<Record>
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  bounding box → LocationTable (same columns)
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
