//! Wayside Core - Track-to-Asset Geospatial Matching
//!
//! Links a dense trajectory of timestamped, speed-tagged GPS fixes to sparse
//! sets of fixed wayside assets:
//! 1. **Distance**: haversine great-circle meters on the WGS84 sphere
//! 2. **Index**: fixed-grid bucketing with 3×3 neighborhood queries
//! 3. **Matcher**: nearest fix under a caller-supplied threshold, one result
//!    per asset in input order
//! 4. **Summary**: a fold over the result sequence into aggregate statistics

pub mod error;
pub mod geodesy;
pub mod grid;
pub mod matcher;
pub mod summary;
pub mod types;

// Re-export key types for convenience
pub use error::CoreError;
pub use geodesy::haversine_m;
pub use grid::{GridConfig, GridIndex, GridStats};
pub use matcher::{match_assets, AnalysisReport, MatchConfig};
pub use summary::summarize;
pub use types::{Asset, AssetKind, MatchResult, Summary, TrackFix};
