/// Data layer: core types, loading, cleaning, projection and output.
///
/// Architecture:
/// ```text
///   .csv / .xlsx upload
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse bytes → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean    │  drop duplicates, fill numeric gaps with the mean (in place)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  project onto chosen columns → new Dataset
///   └──────────┘
///        │
///        ├──────────────┬──────────────┐
///        ▼              ▼              ▼
///   ┌──────────┐  ┌──────────┐  ┌──────────┐
///   │  chart    │  │ convert   │  │  render   │
///   └──────────┘  └──────────┘  └──────────┘
///   bar series     CSV / XLSX     plain-text table
/// ```

pub mod chart;
pub mod clean;
pub mod convert;
pub mod loader;
pub mod model;
pub mod render;
pub mod select;
