//! Wayside Tabular - ingestion boundary for the matching core
//!
//! Turns string-keyed CSV rows into the typed rows `wayside_core` consumes:
//! resolves ambiguous column names against alias lists, parses coordinates
//! and speeds once, and applies the row-error policy so the core never sees
//! a string field it has to re-parse.

pub mod columns;
pub mod error;
pub mod reader;

// Re-export key types for convenience
pub use columns::{AssetColumns, TrackColumns};
pub use error::TabularError;
pub use reader::{read_assets, read_assets_file, read_track, read_track_file};
